//! The fixed token catalogue
//!
//! One key pair is generated and every token is signed exactly once when the
//! factory is built. Nothing here is mutated afterwards, so the factory can be
//! shared between handlers behind an `Arc` without locking.

use crate::claims::{Asserter, VisaClaim};
use crate::config::OidcConfig;
use crate::keys::{JwkSet, KeyPair};
use crate::token::{Audience, PassportClaims, SignedToken, TokenError, TokenSigner};

/// Subject of every mock token
pub const SUBJECT: &str = "requester@elixir-europe.org";

const ACCESS_JTI: &str = "6ad7aa42-3e9c-4833-bd16-765cb80c2102";
const PASSPORT_SCOPE: &str = "openid ga4gh_passport_v1";
const BONA_FIDE_POLICY: &str = "https://doi.org/10.1038/s41431-018-0219-y";

const VISA_ASSERTED: i64 = 1568699331;
const VISA_ISSUED: i64 = 1571144438;
const FAR_FUTURE: i64 = 99999999999;

/// Every token the mock provider hands out
pub struct TokenFactory {
    keypair: KeyPair,
    jwks: JwkSet,
    dataset: SignedToken,
    empty: SignedToken,
    terms: SignedToken,
    status: SignedToken,
    dataset1: SignedToken,
    dataset2: SignedToken,
    dataset_gdi: SignedToken,
}

impl TokenFactory {
    /// Generate a key pair and sign the catalogue
    pub fn new(config: &OidcConfig) -> Result<Self, TokenError> {
        Self::with_keypair(config, KeyPair::generate()?)
    }

    /// Sign the catalogue with an existing key pair
    pub fn with_keypair(config: &OidcConfig, keypair: KeyPair) -> Result<Self, TokenError> {
        let signer = TokenSigner::new(&keypair, Some(config.jwks_uri()))?;
        let iss = config.token_issuer();

        let dataset = signer.sign(
            PassportClaims::new(SUBJECT, &iss, 1561621913, 9999999999)
                .with_audience(Audience::Many(vec!["aud2".to_string(), "aud3".to_string()]))
                .with_scope(PASSPORT_SCOPE, "azp")
                .with_jti(ACCESS_JTI),
        )?;

        let empty = signer.sign(
            PassportClaims::new(SUBJECT, &iss, 1547794655, FAR_FUTURE).with_jti(ACCESS_JTI),
        )?;

        let visa = |claim: VisaClaim, jti: &str| {
            signer.sign(
                PassportClaims::new(SUBJECT, &iss, VISA_ISSUED, FAR_FUTURE)
                    .with_visa(claim)
                    .with_jti(jti),
            )
        };

        let terms = visa(
            VisaClaim::accepted_terms(BONA_FIDE_POLICY, Asserter::Dac, VISA_ASSERTED),
            "bed0aff9-29b1-452c-b776-a6f2200b6db1",
        )?;
        let status = visa(
            VisaClaim::researcher_status(BONA_FIDE_POLICY, Asserter::Peer, VISA_ASSERTED),
            "722ddde1-617d-4651-992d-f0fdde77bf29",
        )?;
        let dataset1 = visa(
            VisaClaim::dataset_grant(
                "https://www.ebi.ac.uk/ega/urn:hg:1000genome:controlled",
                Asserter::SelfAsserted,
                VISA_ASSERTED,
            ),
            "d1d7b521-bd6b-433d-b2d5-3d874aab9d55",
        )?;
        let dataset2 = visa(
            VisaClaim::dataset_grant(
                "https://www.ebi.ac.uk/ega/EGAD00010000919",
                Asserter::Dac,
                VISA_ASSERTED,
            ),
            "9fa600d6-4148-47c1-b708-36c4ba2e980e",
        )?;
        let dataset_gdi = visa(
            VisaClaim::dataset_grant(
                "https://www.ebi.ac.uk/ega/GDI-NO-10001",
                Asserter::Dac,
                VISA_ASSERTED,
            ),
            "2b322848-506b-492c-914f-47f9da967cdd",
        )?;

        tracing::info!(issuer = %config.issuer, kid = keypair.kid(), "Signed mock token catalogue");

        Ok(Self {
            jwks: JwkSet::single(keypair.jwk()),
            keypair,
            dataset,
            empty,
            terms,
            status,
            dataset1,
            dataset2,
            dataset_gdi,
        })
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    /// The published key set
    pub fn jwks(&self) -> &JwkSet {
        &self.jwks
    }

    /// Access token carrying the passport scope
    pub fn dataset_token(&self) -> &SignedToken {
        &self.dataset
    }

    /// Token of a user who has not released any passport claims
    pub fn empty_token(&self) -> &SignedToken {
        &self.empty
    }

    /// The five visas in passport order: terms, status, dataset1, dataset2, gdi
    pub fn visas(&self) -> [&SignedToken; 5] {
        [
            &self.terms,
            &self.status,
            &self.dataset1,
            &self.dataset2,
            &self.dataset_gdi,
        ]
    }

    /// Tokens handed to test harnesses: access, empty and the dataset2 visa
    pub fn fixtures(&self) -> [&str; 3] {
        [
            self.dataset.as_str(),
            self.empty.as_str(),
            self.dataset2.as_str(),
        ]
    }

    /// Whether `token` is literally the empty token.
    ///
    /// This is plain string equality used to tell the consent-less fixture
    /// user apart from everyone else. It is not token validation.
    pub fn is_empty_token(&self, token: &str) -> bool {
        token == self.empty.as_str()
    }
}
