//! Canonical message construction.
//!
//! The signed bytes must be identical between issuance and verification, so
//! the field order, the literal labels, and the RFC 3339 timestamp
//! rendering are all part of the contract. Reordering anything here breaks
//! every in-flight challenge.

use froglink_types::{BtcAddress, FrogId, InscriptionId, Nonce, Timestamp};

/// First line of every link challenge; doubles as the domain-separation
/// header so the signature cannot be replayed against another application.
const LINK_HEADER: &str = "Bitcoin Frogs → Froggys Link";

/// First line of the wallet-connect message.
const CONNECT_HEADER: &str = "Bitcoin Frogs Verification";

/// Literal prefix of the nonce line in both message forms.
const NONCE_LABEL: &str = "Nonce: ";

/// Build the canonical link-challenge text a wallet signs.
pub fn build_link_challenge(
    frog_id: FrogId,
    inscription_id: &InscriptionId,
    nonce: &Nonce,
    issued_at: Timestamp,
    expires_at: Timestamp,
    domain: &str,
) -> String {
    [
        LINK_HEADER.to_string(),
        format!("Frog ID: {frog_id}"),
        format!("Inscription: {inscription_id}"),
        format!("{NONCE_LABEL}{nonce}"),
        format!("Domain: {domain}"),
        format!("Issued At: {}", issued_at.to_rfc3339()),
        format!("Expires At: {}", expires_at.to_rfc3339()),
    ]
    .join("\n")
}

/// Build the canonical wallet-connect message.
pub fn build_connect_message(address: &BtcAddress, nonce: &Nonce, created_at: Timestamp) -> String {
    [
        CONNECT_HEADER.to_string(),
        format!("Address: {address}"),
        format!("{NONCE_LABEL}{nonce}"),
        format!("Time: {}", created_at.to_rfc3339()),
    ]
    .join("\n")
}

/// Pull the nonce out of a connect message by its literal line prefix.
///
/// The message format is ours, so there is nothing to sniff: a line
/// starting with `Nonce: ` holds the hex nonce, or the message is invalid.
pub fn extract_nonce(message: &str) -> Option<Nonce> {
    message
        .lines()
        .find_map(|line| line.strip_prefix(NONCE_LABEL))
        .map(|raw| Nonce::new(raw.trim()))
        .filter(Nonce::is_well_formed)
}
