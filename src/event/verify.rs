//! Signature verification boundary
//!
//! The crate never implements a signature scheme. Callers plug one in
//! through `SignatureVerifier`; `verify_event` does the part that is pure
//! data (recomputing the id) and hands the rest across the boundary.

use crate::error::VerifyError;

use super::{compute_id, Event, PublicKey, Signature};

/// Checks a signature over a 32-byte digest
pub trait SignatureVerifier {
    fn verify(&self, pubkey: &PublicKey, digest: &[u8; 32], sig: &Signature) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&PublicKey, &[u8; 32], &Signature) -> bool,
{
    fn verify(&self, pubkey: &PublicKey, digest: &[u8; 32], sig: &Signature) -> bool {
        self(pubkey, digest, sig)
    }
}

/// Recompute the id from the canonical form, then check the signature.
///
/// The id check runs first so a verifier is never asked about a digest
/// that does not belong to the event.
pub fn verify_event<V>(event: &Event, verifier: &V) -> Result<(), VerifyError>
where
    V: SignatureVerifier + ?Sized,
{
    let computed = compute_id(event);
    if computed != event.id {
        return Err(VerifyError::IdMismatch {
            expected: event.id,
            computed,
        });
    }

    if !verifier.verify(&event.pubkey, computed.as_bytes(), &event.sig) {
        return Err(VerifyError::BadSignature(event.id));
    }

    Ok(())
}
