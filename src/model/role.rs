use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Role asserted by the bearer token. The numeric ids are what the token
/// carries; the display names are the ones the web client shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, AsRefStr, EnumIter)]
pub enum Role {
    #[strum(serialize = "Admin User")]
    AdminUser = 1,
    #[strum(serialize = "HR Manager")]
    HrManager = 2,
    #[strum(serialize = "Second Manager")]
    SecondManager = 3,
    #[strum(serialize = "Employee")]
    Employee = 4,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::AdminUser),
            2 => Some(Role::HrManager),
            3 => Some(Role::SecondManager),
            4 => Some(Role::Employee),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn is_manager(self) -> bool {
        matches!(self, Role::AdminUser | Role::HrManager)
    }
}
