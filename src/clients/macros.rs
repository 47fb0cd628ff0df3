/// Generates the CRUD and subscription methods of an entity client.
///
/// `$one` and `$many` name the entity in method names, so
/// `impl_client_methods!(UserClient, User, UserError, user, users)` yields
/// `get_user`, `get_users`, `create_user`, `update_user`, `delete_user`,
/// `subscribe_users` and `unsubscribe_users`.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $one:ident, $many:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $one>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $many>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list().await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<create_ $one>](
                    &self,
                    input: <$entity as $crate::actor_framework::Entity>::Input,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.create(input).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $one>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                    input: <$entity as $crate::actor_framework::Entity>::Input,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, input).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $one>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<subscribe_ $many>](
                    &self,
                ) -> Result<$crate::broadcaster::Subscription<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.subscribe().await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<unsubscribe_ $many>](
                    &self,
                    id: $crate::broadcaster::SubscriberId,
                ) -> Result<bool, $error> {
                    tracing::debug!("Sending request");
                    self.inner.unsubscribe(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn shutdown(&self) -> Result<(), $error> {
                    tracing::debug!("Sending shutdown");
                    self.inner.shutdown().await.map_err(<$error>::from)
                }
            }
        }
    };
}
