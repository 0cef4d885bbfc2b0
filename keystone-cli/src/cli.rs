use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use keystone_crypto::{derive_keypair, derive_member_key, derive_project_key, stretch, DerivedKey, Salt};
use tracing::{debug, info};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "keystone", version, about = "Derive Keystone password hashes, keypairs, and project keys.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[inline]
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn execute(self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        self.command.run(&mut stdin.lock(), &mut stdout)
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Generate a random hex salt.
    Salt,

    /// Stretch a password read from stdin into a hex password hash.
    Hash {
        /// Salt the account was activated with.
        #[arg(short, long)]
        salt: String,
    },

    /// Print the public key PEM derived from a password hash.
    Keypair {
        /// Hex password hash.
        #[arg(long)]
        hash: String,
    },

    /// Derive a project key from the admin and manager password hashes.
    ProjectKey {
        /// Admin's hex password hash.
        #[arg(long)]
        admin: String,

        /// Manager's hex password hash.
        #[arg(long)]
        manager: String,
    },

    /// Derive a member key from a member's password hash and a project key.
    MemberKey {
        /// Member's hex password hash.
        #[arg(long)]
        member: String,

        /// Hex project key.
        #[arg(long)]
        project: String,
    },
}

impl Commands {
    pub fn run(self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Salt => {
                writeln!(out, "{}", Salt::random())?;
            }
            Self::Hash { salt } => {
                let password = read_password(input)?;
                let hash = stretch(&password, &Salt::new(salt)).context("failed to stretch password")?;
                writeln!(out, "{}", hash.to_hex().as_str())?;
            }
            Self::Keypair { hash } => {
                let hash = parse_key("--hash", &hash)?;
                info!("deriving keypair, this takes a moment");
                let keypair = derive_keypair(&hash).context("failed to derive keypair")?;
                write!(out, "{}", keypair.public_key_pem()?)?;
            }
            Self::ProjectKey { admin, manager } => {
                let admin = parse_key("--admin", &admin)?;
                let manager = parse_key("--manager", &manager)?;
                let key = derive_project_key(&admin, &manager)?;
                writeln!(out, "{}", key.to_hex().as_str())?;
            }
            Self::MemberKey { member, project } => {
                let member = parse_key("--member", &member)?;
                let project = parse_key("--project", &project)?;
                let key = derive_member_key(&member, &project)?;
                writeln!(out, "{}", key.to_hex().as_str())?;
            }
        }
        Ok(())
    }
}

fn read_password(input: &mut impl BufRead) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    input.read_line(&mut line).context("failed to read password from stdin")?;
    let password = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string());
    if password.is_empty() {
        bail!("empty password on stdin");
    }
    debug!("read password from stdin");
    Ok(password)
}

fn parse_key(flag: &str, hex: &str) -> Result<DerivedKey> {
    DerivedKey::from_hex(hex.trim()).with_context(|| format!("{flag} must be 64 hex characters"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALICE_HASH: &str = "3bb09e14bb61114cfcfae234066fcb6af9665b55c70b1a64912831cd7f18cd2e";

    fn run(args: &[&str], stdin: &str) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("keystone").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        cli.command.run(&mut stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["keystone", "project-key", "--admin", "a", "--manager", "m"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::ProjectKey { admin: "a".into(), manager: "m".into() }
        );
        assert!(Cli::try_parse_from(["keystone", "hash"]).is_err());
    }

    #[test]
    fn salt_prints_hex() {
        let out = run(&["salt"], "").unwrap();
        assert_eq!(out.trim().len(), 32);
        assert!(out.trim().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_reads_password_from_stdin() {
        let out = run(&["hash", "--salt", "deadbeef"], "Abcd1234\n").unwrap();
        assert_eq!(out.trim(), ALICE_HASH);
    }

    #[test]
    fn hash_rejects_empty_stdin() {
        assert!(run(&["hash", "--salt", "deadbeef"], "\n").is_err());
    }

    #[test]
    fn project_key_depends_on_argument_order() {
        let other = "00".repeat(32);
        let a = run(&["project-key", "--admin", ALICE_HASH, "--manager", &other], "").unwrap();
        let b = run(&["project-key", "--admin", &other, "--manager", ALICE_HASH], "").unwrap();
        assert_eq!(a.trim().len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn member_key_matches_library() {
        let project = "11".repeat(32);
        let out = run(&["member-key", "--member", ALICE_HASH, "--project", &project], "").unwrap();

        let expected = derive_member_key(
            &DerivedKey::from_hex(ALICE_HASH).unwrap(),
            &DerivedKey::from_hex(&project).unwrap(),
        )
        .unwrap();
        assert_eq!(out.trim(), expected.to_hex().as_str());
    }

    #[test]
    fn malformed_key_is_rejected() {
        let err = run(&["keypair", "--hash", "xyz"], "").unwrap_err();
        assert!(err.to_string().contains("--hash"));
    }
}
