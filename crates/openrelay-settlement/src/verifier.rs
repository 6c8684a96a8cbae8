//! Authorization verifier — strict ed25519 over the canonical digest.
//!
//! Input lengths are validated before anything is parsed: exactly 32 bytes
//! of public key and 64 bytes of signature, so truncated or padded inputs
//! fail loudly instead of being silently accepted. Verification uses
//! `verify_strict`, which rejects malleable signature encodings.
//!
//! Verifying proves possession of the private key matching the *supplied*
//! public key; it does not prove that key belongs to `auth.sender`. The
//! off-chain layer owns the key-to-address mapping.

use ed25519_dalek::{Signature, VerifyingKey};
use openrelay_types::{
    constants::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH},
    RelayError, Result, TransferAuthorization,
};

/// Verify a detached signature over the authorization's signing digest.
///
/// # Errors
/// - `MalformedSignatureInput` for wrong-length inputs or a public key that
///   is not a valid curve point
/// - `SignatureMismatch` when strict verification fails
pub fn verify(
    auth: &TransferAuthorization,
    signature: &[u8],
    public_key: &[u8],
) -> Result<()> {
    let pk_bytes: [u8; PUBLIC_KEY_LENGTH] =
        public_key
            .try_into()
            .map_err(|_| RelayError::MalformedSignatureInput {
                reason: format!(
                    "public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
                    public_key.len()
                ),
            })?;

    let sig_bytes: [u8; SIGNATURE_LENGTH] =
        signature
            .try_into()
            .map_err(|_| RelayError::MalformedSignatureInput {
                reason: format!(
                    "signature must be {SIGNATURE_LENGTH} bytes, got {}",
                    signature.len()
                ),
            })?;

    let verifying_key =
        VerifyingKey::from_bytes(&pk_bytes).map_err(|_| RelayError::MalformedSignatureInput {
            reason: "public key is not a valid ed25519 point".to_string(),
        })?;

    let signature = Signature::from_bytes(&sig_bytes);

    verifying_key
        .verify_strict(&auth.signing_digest(), &signature)
        .map_err(|_| RelayError::SignatureMismatch)
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::SigningKey;
    use openrelay_types::Address;

    use super::*;

    fn make_signed() -> (TransferAuthorization, Vec<u8>, Vec<u8>) {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let auth =
            TransferAuthorization::dummy(Address([1u8; 32]), Address([2u8; 32]), 500, 0);
        let (sig, pk) = auth.signed_by(&key);
        (auth, sig, pk)
    }

    #[test]
    fn valid_signature_verifies() {
        let (auth, sig, pk) = make_signed();
        assert!(verify(&auth, &sig, &pk).is_ok());
    }

    #[test]
    fn truncated_public_key_rejected() {
        let (auth, sig, pk) = make_signed();
        let err = verify(&auth, &sig, &pk[..31]).unwrap_err();
        assert!(matches!(err, RelayError::MalformedSignatureInput { .. }));
    }

    #[test]
    fn padded_signature_rejected() {
        let (auth, mut sig, pk) = make_signed();
        sig.push(0);
        let err = verify(&auth, &sig, &pk).unwrap_err();
        assert!(matches!(err, RelayError::MalformedSignatureInput { .. }));
    }

    #[test]
    fn invalid_curve_point_rejected() {
        let (auth, sig, _) = make_signed();
        // All-0xFF is not a valid compressed point
        let err = verify(&auth, &sig, &[0xFF; 32]).unwrap_err();
        assert!(matches!(err, RelayError::MalformedSignatureInput { .. }));
    }

    #[test]
    fn wrong_key_rejected() {
        let (auth, sig, _) = make_signed();
        let other = SigningKey::from_bytes(&[8u8; 32]);
        let err = verify(&auth, &sig, &other.verifying_key().to_bytes()).unwrap_err();
        assert!(matches!(err, RelayError::SignatureMismatch));
    }

    #[test]
    fn tampered_field_rejected() {
        let (mut auth, sig, pk) = make_signed();
        auth.amount += 1;
        let err = verify(&auth, &sig, &pk).unwrap_err();
        assert!(matches!(err, RelayError::SignatureMismatch));
    }

    #[test]
    fn any_key_may_sign_for_any_sender() {
        // The verifier binds the signature to the supplied key, not to
        // auth.sender; callers own the key-to-address mapping.
        let key = SigningKey::from_bytes(&[9u8; 32]);
        let auth =
            TransferAuthorization::dummy(Address([0xAA; 32]), Address([2u8; 32]), 500, 0);
        let (sig, pk) = auth.signed_by(&key);
        assert!(verify(&auth, &sig, &pk).is_ok());
    }
}
