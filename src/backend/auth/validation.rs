/*!
 * Credential Format Rules
 *
 * Logins: 3-20 characters from `[A-Za-z0-9_-]`.
 *
 * Passwords: 8-25 characters, made only of upper-case letters, lower-case
 * letters, decimal digits and punctuation/symbols, with at least one of each.
 * Any printable character that is neither alphanumeric nor whitespace counts
 * as punctuation or a symbol, so `€`, `§` and `«` qualify.
 */

const MIN_LOGIN_LEN: usize = 3;
const MAX_LOGIN_LEN: usize = 20;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 25;

/// Check login format
pub fn is_valid_login(login: &str) -> bool {
    if login.len() < MIN_LOGIN_LEN || login.len() > MAX_LOGIN_LEN {
        return false;
    }

    login
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_punctuation_or_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
}

/// Check password format
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN || len > MAX_PASSWORD_LEN {
        return false;
    }

    let (mut upper, mut lower, mut digit, mut special) = (false, false, false, false);
    for c in password.chars() {
        if c.is_uppercase() {
            upper = true;
        } else if c.is_lowercase() {
            lower = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if is_punctuation_or_symbol(c) {
            special = true;
        } else {
            return false;
        }
    }

    upper && lower && digit && special
}
