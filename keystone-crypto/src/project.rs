//! Project and member key derivation.
//!
//! A project key is never transmitted: the admin and the manager each hold
//! one of the two password hashes it is derived from, and the admin can
//! recover the manager's hash from its escrow copy. Member keys extend the
//! same idea to every member of a project.
//!
//! Both derivations are pure. No I/O, no randomness.

use crate::error::CryptoResult;
use crate::kdf::{stretch_bytes, MemberKey, PasswordHash, ProjectKey, KEY_SIZE};
use zeroize::Zeroizing;

/// Derives the project key from the admin's and the manager's password
/// hashes.
///
/// The hashes are concatenated admin first and stretched with an empty
/// salt: both inputs are already salted, high-entropy outputs of the KDF.
/// Argument order is part of the contract.
pub fn derive_project_key(admin_hash: &PasswordHash, manager_hash: &PasswordHash) -> CryptoResult<ProjectKey> {
    let mut combined = Zeroizing::new(Vec::with_capacity(KEY_SIZE * 2));
    combined.extend_from_slice(admin_hash.as_bytes());
    combined.extend_from_slice(manager_hash.as_bytes());
    stretch_bytes(&combined, &[])
}

/// Derives a member's key by stretching their password hash with the
/// project key as salt.
pub fn derive_member_key(member_hash: &PasswordHash, project_key: &ProjectKey) -> CryptoResult<MemberKey> {
    stretch_bytes(member_hash.as_bytes(), project_key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::{stretch, Salt};

    fn hash(password: &str, salt: &str) -> PasswordHash {
        stretch(password, &Salt::from(salt)).unwrap()
    }

    #[test]
    fn project_key_is_idempotent() {
        let admin = hash("admin-pw", "salt-a");
        let manager = hash("manager-pw", "salt-m");
        let first = derive_project_key(&admin, &manager).unwrap();
        let second = derive_project_key(&admin, &manager).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn argument_order_is_significant() {
        let admin = hash("admin-pw", "salt-a");
        let manager = hash("manager-pw", "salt-m");
        assert_ne!(
            derive_project_key(&admin, &manager).unwrap(),
            derive_project_key(&manager, &admin).unwrap()
        );
    }

    #[test]
    fn project_key_is_the_stretched_concatenation() {
        let admin = hash("admin-pw", "salt-a");
        let manager = hash("manager-pw", "salt-m");
        let mut combined = admin.as_bytes().to_vec();
        combined.extend_from_slice(manager.as_bytes());
        assert_eq!(
            derive_project_key(&admin, &manager).unwrap(),
            stretch_bytes(&combined, b"").unwrap()
        );
    }

    #[test]
    fn member_key_differs_from_both_inputs() {
        let member = hash("member-pw", "salt-x");
        let project = derive_project_key(&hash("a", "1"), &hash("m", "2")).unwrap();
        let member_key = derive_member_key(&member, &project).unwrap();
        assert_ne!(member_key, member);
        assert_ne!(member_key, project);
    }

    #[test]
    fn member_key_is_pbkdf2_of_hash_salted_with_project_key() {
        // The member hash only enters as the PBKDF2 password, so recovering
        // it from the member key means inverting HMAC-SHA256.
        let member = hash("member-pw", "salt-x");
        let project = derive_project_key(&hash("a", "1"), &hash("m", "2")).unwrap();
        assert_eq!(
            derive_member_key(&member, &project).unwrap(),
            stretch_bytes(member.as_bytes(), project.as_bytes()).unwrap()
        );
    }

    #[test]
    fn member_keys_are_distinct_per_member_and_project() {
        let project_a = derive_project_key(&hash("a", "1"), &hash("m", "2")).unwrap();
        let project_b = derive_project_key(&hash("a", "1"), &hash("m2", "3")).unwrap();
        let alice = hash("alice", "s1");
        let bob = hash("bob", "s2");
        assert_ne!(
            derive_member_key(&alice, &project_a).unwrap(),
            derive_member_key(&bob, &project_a).unwrap()
        );
        assert_ne!(
            derive_member_key(&alice, &project_a).unwrap(),
            derive_member_key(&alice, &project_b).unwrap()
        );
    }
}
