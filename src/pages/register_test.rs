use super::*;

#[test]
fn username_is_trimmed_and_lowercased() {
    assert_eq!(validate_username("  Ada_99  "), Ok("ada_99".to_owned()));
}

#[test]
fn username_length_is_bounded() {
    assert_eq!(validate_username("ab"), Err("Username must be 3-30 characters."));
    assert_eq!(
        validate_username(&"a".repeat(31)),
        Err("Username must be 3-30 characters.")
    );
    assert!(validate_username(&"a".repeat(30)).is_ok());
}

#[test]
fn username_rejects_other_characters() {
    assert_eq!(
        validate_username("ada lovelace"),
        Err("Username may only contain letters, numbers, and underscores.")
    );
    assert_eq!(
        validate_username("ada!"),
        Err("Username may only contain letters, numbers, and underscores.")
    );
}

#[test]
fn email_requires_local_domain_and_dot() {
    assert_eq!(validate_email(" Ada@Example.COM "), Ok("ada@example.com".to_owned()));
    assert_eq!(validate_email("ada"), Err("Enter a valid email address."));
    assert_eq!(validate_email("@example.com"), Err("Enter a valid email address."));
    assert_eq!(validate_email("ada@com"), Err("Enter a valid email address."));
}

#[test]
fn password_requires_length_uppercase_and_digit() {
    assert_eq!(validate_password("Ab1"), Err("Password must be at least 8 characters."));
    assert_eq!(
        validate_password("alllower1"),
        Err("Password must contain at least one uppercase letter.")
    );
    assert_eq!(
        validate_password("AllLetters"),
        Err("Password must contain at least one digit.")
    );
    assert_eq!(validate_password("Passw0rd"), Ok(()));
}
