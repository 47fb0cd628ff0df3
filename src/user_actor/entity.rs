use crate::actor_framework::Entity;
use crate::domain::{User, UserInput};

impl Entity for User {
    type Id = String;
    type Input = UserInput;

    fn id(&self) -> &String {
        &self.id
    }

    /// User ids are the decimal form of the store's counter: "1", "2", ...
    fn assign_id(seq: u64) -> String {
        seq.to_string()
    }

    fn from_input(id: String, input: UserInput) -> Self {
        Self {
            id,
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            age: input.age,
            profession: input.profession,
        }
    }

    /// Replaces every profile field. There is no partial update.
    fn apply_input(&mut self, input: UserInput) {
        self.firstname = input.firstname;
        self.lastname = input.lastname;
        self.email = input.email;
        self.age = input.age;
        self.profession = input.profession;
    }
}
