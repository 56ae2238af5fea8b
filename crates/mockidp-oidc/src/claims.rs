//! GA4GH visa claims
//!
//! A visa asserts one fact about the subject and is embedded in a signed
//! token under the `ga4gh_visa_v1` claim.

use serde::{Deserialize, Serialize};

/// Source organisation recorded on every mock visa
pub const NO_ORG_SOURCE: &str = "https://ga4gh.org/duri/no_org";

/// Who asserted a visa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asserter {
    /// Self-asserted by the subject
    #[serde(rename = "self")]
    SelfAsserted,
    /// Asserted by a peer
    Peer,
    /// Asserted by a data access committee
    Dac,
    /// Asserted by the issuing system
    System,
}

/// Fields shared by every visa type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaFields {
    /// The asserted value, usually a URL
    pub value: String,

    /// Organisation that is the source of the assertion
    pub source: String,

    /// Who made the assertion
    pub by: Asserter,

    /// When the assertion was made (seconds since epoch)
    pub asserted: i64,
}

/// A GA4GH visa, tagged by its `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisaClaim {
    /// The subject accepted the terms and policies at `value`
    AcceptedTermsAndPolicies(VisaFields),
    /// The subject is a bona fide researcher
    ResearcherStatus(VisaFields),
    /// The subject was granted access to the dataset at `value`
    ControlledAccessGrants(VisaFields),
}

impl VisaClaim {
    pub fn accepted_terms(value: impl Into<String>, by: Asserter, asserted: i64) -> Self {
        Self::AcceptedTermsAndPolicies(VisaFields::no_org(value, by, asserted))
    }

    pub fn researcher_status(value: impl Into<String>, by: Asserter, asserted: i64) -> Self {
        Self::ResearcherStatus(VisaFields::no_org(value, by, asserted))
    }

    pub fn dataset_grant(value: impl Into<String>, by: Asserter, asserted: i64) -> Self {
        Self::ControlledAccessGrants(VisaFields::no_org(value, by, asserted))
    }

    /// The visa type name as it appears on the wire
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AcceptedTermsAndPolicies(_) => "AcceptedTermsAndPolicies",
            Self::ResearcherStatus(_) => "ResearcherStatus",
            Self::ControlledAccessGrants(_) => "ControlledAccessGrants",
        }
    }

    pub fn fields(&self) -> &VisaFields {
        match self {
            Self::AcceptedTermsAndPolicies(f)
            | Self::ResearcherStatus(f)
            | Self::ControlledAccessGrants(f) => f,
        }
    }
}

impl VisaFields {
    fn no_org(value: impl Into<String>, by: Asserter, asserted: i64) -> Self {
        Self {
            value: value.into(),
            source: NO_ORG_SOURCE.to_string(),
            by,
            asserted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visa_wire_shape() {
        let visa = VisaClaim::dataset_grant(
            "https://www.ebi.ac.uk/ega/EGAD00010000919",
            Asserter::Dac,
            1568699331,
        );

        assert_eq!(
            serde_json::to_value(&visa).unwrap(),
            json!({
                "type": "ControlledAccessGrants",
                "value": "https://www.ebi.ac.uk/ega/EGAD00010000919",
                "source": "https://ga4gh.org/duri/no_org",
                "by": "dac",
                "asserted": 1568699331
            })
        );
    }

    #[test]
    fn test_self_asserter_name() {
        assert_eq!(
            serde_json::to_value(Asserter::SelfAsserted).unwrap(),
            json!("self")
        );
        assert_eq!(serde_json::to_value(Asserter::System).unwrap(), json!("system"));
    }

    #[test]
    fn test_unknown_visa_type_rejected() {
        let raw = json!({
            "type": "LinkedIdentities",
            "value": "x",
            "source": NO_ORG_SOURCE,
            "by": "system",
            "asserted": 1
        });
        assert!(serde_json::from_value::<VisaClaim>(raw).is_err());
    }
}
