use bon::bon;
use ndn_name::{Name, NameRelation};
use tracing::debug;

use crate::{error::Error, Regex};

/// Checks that a packet name and a key name are related after expansion.
///
/// Both names must match their regex. The name expanded from the key regex must then stand in
/// `relation` to the name expanded from the packet regex.
///
/// ## Example
/// ```
/// use ndn_name::Name;
/// use ndn_regex::HyperRelation;
///
/// let relation = HyperRelation::builder()
///     .packet_regex("^(<>*)$")
///     .packet_expand(r"\1")
///     .key_regex("^(<>*)<KEY><>$")
///     .key_expand(r"\1")
///     .relation("is-prefix-of")
///     .build()?;
///
/// let key = Name::from("/ndn/edu/ucla/KEY/ksk-1");
/// assert!(relation.check(&Name::from("/ndn/edu/ucla/yingdi"), &key)?);
/// assert!(!relation.check(&Name::from("/ndn/edu/mit"), &key)?);
/// # Ok::<(), ndn_regex::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HyperRelation {
    packet: Regex,
    key: Regex,
    relation: NameRelation,
}

#[bon]
impl HyperRelation {
    #[builder]
    pub fn new(
        packet_regex: &str,
        packet_expand: &str,
        key_regex: &str,
        key_expand: &str,
        /// `equal`, `is-prefix-of` or `is-strict-prefix-of`.
        relation: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            packet: Regex::with_expand(packet_regex, packet_expand)?,
            key: Regex::with_expand(key_regex, key_expand)?,
            relation: relation.parse()?,
        })
    }

    pub fn relation(&self) -> NameRelation {
        self.relation
    }

    pub fn check(&self, packet: &Name, key: &Name) -> Result<bool, Error> {
        let (Some(packet_captures), Some(key_captures)) =
            (self.packet.captures(packet), self.key.captures(key))
        else {
            debug!(
                packet_regex = self.packet.as_str(),
                key_regex = self.key.as_str(),
                %packet,
                %key,
                "names do not match the hyper relation regexes"
            );
            return Ok(false);
        };

        let packet_expanded = packet_captures.expand(self.packet.expand_template())?;
        let key_expanded = key_captures.expand(self.key.expand_template())?;
        let related = self.relation.check(&key_expanded, &packet_expanded);
        if !related {
            debug!(
                %key_expanded,
                relation = %self.relation,
                %packet_expanded,
                "names violate the hyper relation"
            );
        }
        Ok(related)
    }
}
