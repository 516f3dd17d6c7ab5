use const_format::concatcp;

use crate::api::API_BASE_PATH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Users,
    UserExercises,
    UserLogs,
    Ping,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Users => concatcp!(API_BASE_PATH, "users"),
            UserExercises => concatcp!(API_BASE_PATH, "users/:user_id/exercises"),
            UserLogs => concatcp!(API_BASE_PATH, "users/:user_id/logs"),
            Ping => concatcp!(API_BASE_PATH, "ping"),
        }
    }

    /// Fill the `:user_id` placeholder of a user scoped path
    pub fn user_path(&self, user_id: &str) -> String {
        self.path().replace(":user_id", user_id)
    }
}
