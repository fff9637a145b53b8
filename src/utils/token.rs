use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub fn generate_access_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Share tokens are uppercased so they survive being read aloud or typed
/// from an email.
pub fn generate_share_token(length: usize) -> String {
    generate_access_token(length).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_has_requested_length_and_charset() {
        let token = generate_access_token(32);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn share_token_is_uppercase_alphanumeric() {
        let token = generate_share_token(16);
        assert_eq!(token.len(), 16);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_share_token(16)));
        }
    }
}
