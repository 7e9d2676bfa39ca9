//! Identifier casing for parameter and component names
//!
//! Words are separated by `-`, `_` or whitespace. Each word keeps its
//! inner casing; only its first letter is changed.

/// `verify-token` → `VerifyToken`, `user_id` → `UserId`
pub fn to_pascal_case(input: &str) -> String {
    input
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// `verify-token` → `verifyToken`, `UserId` → `userId`
pub fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("login"), "Login");
        assert_eq!(to_pascal_case("verify-token"), "VerifyToken");
        assert_eq!(to_pascal_case("user_id"), "UserId");
        assert_eq!(to_pascal_case("already Pascal"), "AlreadyPascal");
        assert_eq!(to_pascal_case("fooBar"), "FooBar");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("id"), "id");
        assert_eq!(to_camel_case("user-id"), "userId");
        assert_eq!(to_camel_case("post_slug"), "postSlug");
        assert_eq!(to_camel_case("UserId"), "userId");
        assert_eq!(to_camel_case("--"), "");
    }
}
