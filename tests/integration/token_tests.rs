//! Token issuing and verification through the public API

#[cfg(test)]
mod tests {
    use shield_rs::auth::tokens::parse_user_token;
    use shield_rs::auth::{Signer, extract_user, new_quota_token, new_user_token, parse_quota_token};
    use std::collections::HashSet;
    use std::time::Duration;

    /// Quota tokens carry distinct ids and never expire on their own
    #[test]
    fn test_quota_tokens_are_unique() {
        let signer = Signer::new("integration");
        let ids: HashSet<_> = (0..100)
            .map(|_| {
                let token = new_quota_token(&signer).unwrap();
                parse_quota_token(&signer, &token).unwrap().uuid
            })
            .collect();
        assert_eq!(ids.len(), 100);
    }

    /// A user token issued under one secret is worthless under another
    #[test]
    fn test_user_token_bound_to_secret() {
        let issuer = Signer::new("issuer");
        let other = Signer::new("somebody else");
        let token = new_user_token(&issuer, "alice", Duration::from_secs(60)).unwrap();

        assert_eq!(extract_user(&issuer, &token), "alice");
        assert_eq!(extract_user(&other, &token), "");
        assert!(parse_user_token(&other, &token).is_none());
    }

    /// Tokens for the same user cannot be linked to each other
    #[test]
    fn test_user_tokens_are_unlinkable() {
        let signer = Signer::new("integration");
        let a = new_user_token(&signer, "alice", Duration::from_secs(60)).unwrap();
        let b = new_user_token(&signer, "alice", Duration::from_secs(60)).unwrap();
        assert_ne!(a, b);

        let a = parse_user_token(&signer, &a).unwrap();
        let b = parse_user_token(&signer, &b).unwrap();
        assert_eq!(a.user, b.user);
        assert_ne!(a.random, b.random);
    }

    /// The two token kinds are not interchangeable
    #[test]
    fn test_token_kinds_do_not_mix() {
        let signer = Signer::new("integration");
        let quota = new_quota_token(&signer).unwrap();
        let user = new_user_token(&signer, "alice", Duration::from_secs(60)).unwrap();

        assert_eq!(extract_user(&signer, &quota), "");
        assert!(parse_quota_token(&signer, &user).is_none());
    }

    #[test]
    fn test_user_token_expires() {
        let signer = Signer::new("integration");
        let token = new_user_token(&signer, "alice", Duration::from_millis(5)).unwrap();
        assert_eq!(extract_user(&signer, &token), "alice");

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(extract_user(&signer, &token), "");
    }
}
