use bytes::{BufMut, Bytes, BytesMut};

use super::{Envelope, Opener, Sealer};
use crate::crypto::{ecdh, lookup, SuiteInfo, SUITE_ID_LEN};
use crate::error::{EnvelopeError, Result};

impl Envelope {
    /// Serialized length: suite id, ephemeral key, nonce, ciphertext+tag.
    pub fn encoded_len(&self) -> usize {
        SUITE_ID_LEN + self.ephemeral_public.len() + self.nonce.len() + self.ciphertext.len()
    }

    /// Serialize the envelope in wire field order.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_u8(self.suite_id);
        buf.put_slice(&self.ephemeral_public);
        buf.put_slice(&self.nonce);
        buf.put_slice(&self.ciphertext);
        buf.freeze()
    }

    /// Cheap pre-validation for the transport listener: the declared suite
    /// of a raw datagram, before any buffer is sized to it.
    pub fn peek_suite(datagram: &[u8]) -> Option<&'static SuiteInfo> {
        datagram.first().and_then(|&id| lookup(id))
    }

    /// Parse a datagram into its envelope fields.
    ///
    /// Field lengths come from the declared suite; the datagram must carry
    /// at least one authentication tag's worth of ciphertext. The reserved
    /// null suite has no wire form and is rejected like an unlisted id.
    pub fn decode(datagram: &[u8]) -> std::result::Result<Self, EnvelopeError> {
        let Some((&suite_id, _)) = datagram.split_first() else {
            return Err(EnvelopeError::Empty);
        };

        let suite = lookup(suite_id).ok_or(EnvelopeError::UnknownSuite(suite_id))?;
        if suite.key_size != ecdh::KEY_LEN {
            return Err(EnvelopeError::UnknownSuite(suite_id));
        }

        let min = SUITE_ID_LEN + ecdh::KEY_LEN + suite.nonce_size + suite.tag_overhead;
        if datagram.len() < min {
            return Err(EnvelopeError::Truncated {
                suite_id,
                len: datagram.len(),
                min,
            });
        }

        let mut at = SUITE_ID_LEN;

        let mut ephemeral_public = [0u8; ecdh::KEY_LEN];
        ephemeral_public.copy_from_slice(&datagram[at..at + ecdh::KEY_LEN]);
        at += ecdh::KEY_LEN;

        let nonce = datagram[at..at + suite.nonce_size].to_vec();
        at += suite.nonce_size;

        let ciphertext = datagram[at..].to_vec();

        Ok(Self {
            suite_id,
            ephemeral_public,
            nonce,
            ciphertext,
        })
    }
}

impl Sealer {
    /// Seal and serialize in one step: the datagram-ready outer payload.
    pub fn seal_datagram(&self, plaintext: &[u8], suite_id: u8) -> Result<Bytes> {
        Ok(self.seal(plaintext, suite_id)?.encode())
    }
}

impl Opener {
    /// Parse and open a raw datagram in one step.
    pub fn open_datagram(&self, datagram: &[u8]) -> Result<Vec<u8>> {
        let envelope = Envelope::decode(datagram)?;
        Ok(self.open(&envelope)?)
    }
}
