use ferrotask::auth::PasswordHasher;

#[test]
fn test_hash_produces_64_char_lowercase_hex() {
    let hasher = PasswordHasher::new("test-salt");
    let digest = hasher.hash("password123").unwrap();

    assert_eq!(digest.len(), 64);
    assert!(digest
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_hash_is_deterministic() {
    let hasher = PasswordHasher::new("test-salt");

    let first = hasher.hash("password123").unwrap();
    let second = hasher.hash("password123").unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_verify_accepts_matching_password() {
    let hasher = PasswordHasher::new("test-salt");
    let digest = hasher.hash("password123").unwrap();

    assert!(hasher.verify("password123", &digest));
}

#[test]
fn test_verify_rejects_wrong_password() {
    let hasher = PasswordHasher::new("test-salt");
    let digest = hasher.hash("password123").unwrap();

    assert!(!hasher.verify("wrongpassword", &digest));
    assert!(!hasher.verify("password124", &digest));
    assert!(!hasher.verify("", &digest));
}

#[test]
fn test_different_salts_produce_different_digests() {
    let password = "password123";
    let digest_a = PasswordHasher::new("salt-one").hash(password).unwrap();
    let digest_b = PasswordHasher::new("salt-two").hash(password).unwrap();

    assert_ne!(digest_a, digest_b);
}

#[test]
fn test_different_passwords_produce_different_digests() {
    let hasher = PasswordHasher::new("test-salt");

    assert_ne!(
        hasher.hash("password123").unwrap(),
        hasher.hash("password124").unwrap()
    );
}

#[test]
fn test_digest_from_one_salt_fails_under_another() {
    let digest = PasswordHasher::new("salt-one").hash("password123").unwrap();

    assert!(!PasswordHasher::new("salt-two").verify("password123", &digest));
}

#[test]
fn test_empty_password_and_salt_are_accepted() {
    let hasher = PasswordHasher::new("");
    let digest = hasher.hash("").unwrap();

    assert_eq!(digest.len(), 64);
    assert!(hasher.verify("", &digest));
    assert!(!hasher.verify("x", &digest));
}

#[test]
fn test_unicode_passwords_hash_cleanly() {
    let hasher = PasswordHasher::new("test-salt");
    let digest = hasher.hash("contraseña-日本語-🔒").unwrap();

    assert_eq!(digest.len(), 64);
    assert!(hasher.verify("contraseña-日本語-🔒", &digest));
    assert!(!hasher.verify("contraseña-日本語", &digest));
}
