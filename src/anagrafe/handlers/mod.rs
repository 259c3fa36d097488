pub mod health;
pub use self::health::health;

pub mod root;
pub use self::root::root;

pub mod user_register;
pub use self::user_register::register;

pub mod user_list;
pub use self::user_list::list_users;

pub mod password_change;
pub use self::password_change::change_password;

pub mod user_delete;
pub use self::user_delete::delete_user;

pub mod user_login;
pub use self::user_login::login;

// common functions for the handlers
use regex::Regex;

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub fn valid_password(password: &str) -> bool {
    // 8 to 72 bytes of UTF-8, the upper bound is where bcrypt truncates
    (8..=72).contains(&password.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("a@x.co"));
        assert!(valid_email("first.last+tag@sub.example.org"));

        assert!(!valid_email(""));
        assert!(!valid_email("user"));
        assert!(!valid_email("user@"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("user name@example.com"));
        assert!(!valid_email("user@@example.com"));
    }

    #[test]
    fn test_valid_password_byte_bounds() {
        assert!(!valid_password("seven77"));
        assert!(valid_password("eight888"));
        assert!(valid_password(&"a".repeat(72)));
        assert!(!valid_password(&"a".repeat(73)));
    }

    #[test]
    fn test_valid_password_counts_bytes_not_chars() {
        // 24 euro signs are 24 chars but 72 bytes
        assert!(valid_password(&"€".repeat(24)));
        assert!(!valid_password(&"€".repeat(25)));
        // 3 euro signs are 9 bytes, above the lower bound
        assert!(valid_password("€€€"));
    }
}
