//! Controlled vocabularies for control attribute markers.
//!
//! Marker lines collected by the segmenter carry `#`-prefixed tokens
//! from five fixed vocabularies. Tokens are matched exactly against
//! the vocabulary spellings, underscores included; unknown tokens are
//! ignored.

use serde::{Deserialize, Serialize};

/// Whether a control acts before, during or after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlType {
    Preventive,
    Detective,
    Corrective,
}

impl ControlType {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Preventive" => Some(Self::Preventive),
            "Detective" => Some(Self::Detective),
            "Corrective" => Some(Self::Corrective),
            _ => None,
        }
    }
}

/// CIA property a control protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InformationSecurityProperty {
    Confidentiality,
    Integrity,
    Availability,
}

impl InformationSecurityProperty {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Confidentiality" => Some(Self::Confidentiality),
            "Integrity" => Some(Self::Integrity),
            "Availability" => Some(Self::Availability),
            _ => None,
        }
    }
}

/// NIST-style cybersecurity framework function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CybersecurityConcept {
    Identify,
    Protect,
    Detect,
    Respond,
    Recover,
}

impl CybersecurityConcept {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Identify" => Some(Self::Identify),
            "Protect" => Some(Self::Protect),
            "Detect" => Some(Self::Detect),
            "Respond" => Some(Self::Respond),
            "Recover" => Some(Self::Recover),
            _ => None,
        }
    }
}

/// Operational capability a control contributes to.
///
/// Token spellings use underscores as the source documents print them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationalCapability {
    Governance,
    #[serde(rename = "Asset_management")]
    AssetManagement,
    #[serde(rename = "Information_protection")]
    InformationProtection,
    #[serde(rename = "Human_resource_security")]
    HumanResourceSecurity,
    #[serde(rename = "Physical_security")]
    PhysicalSecurity,
    #[serde(rename = "System_and_network_security")]
    SystemAndNetworkSecurity,
    #[serde(rename = "Application_security")]
    ApplicationSecurity,
    #[serde(rename = "Secure_configuration")]
    SecureConfiguration,
    #[serde(rename = "Identity_and_access_management")]
    IdentityAndAccessManagement,
    #[serde(rename = "Threat_and_vulnerability_management")]
    ThreatAndVulnerabilityManagement,
    Continuity,
    #[serde(rename = "Supplier_relationships_security")]
    SupplierRelationshipsSecurity,
    #[serde(rename = "Legal_and_compliance")]
    LegalAndCompliance,
    #[serde(rename = "Information_security_event_management")]
    InformationSecurityEventManagement,
    #[serde(rename = "Information_security_assurance")]
    InformationSecurityAssurance,
}

impl OperationalCapability {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Governance" => Some(Self::Governance),
            "Asset_management" => Some(Self::AssetManagement),
            "Information_protection" => Some(Self::InformationProtection),
            "Human_resource_security" => Some(Self::HumanResourceSecurity),
            "Physical_security" => Some(Self::PhysicalSecurity),
            "System_and_network_security" => Some(Self::SystemAndNetworkSecurity),
            "Application_security" => Some(Self::ApplicationSecurity),
            "Secure_configuration" => Some(Self::SecureConfiguration),
            "Identity_and_access_management" => Some(Self::IdentityAndAccessManagement),
            "Threat_and_vulnerability_management" => Some(Self::ThreatAndVulnerabilityManagement),
            "Continuity" => Some(Self::Continuity),
            "Supplier_relationships_security" => Some(Self::SupplierRelationshipsSecurity),
            "Legal_and_compliance" => Some(Self::LegalAndCompliance),
            "Information_security_event_management" => {
                Some(Self::InformationSecurityEventManagement)
            }
            "Information_security_assurance" => Some(Self::InformationSecurityAssurance),
            _ => None,
        }
    }
}

/// Security domain grouping in the source standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityDomain {
    #[serde(rename = "Governance_and_Ecosystem")]
    GovernanceAndEcosystem,
    Protection,
    Defence,
    Resilience,
}

impl SecurityDomain {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Governance_and_Ecosystem" => Some(Self::GovernanceAndEcosystem),
            "Protection" => Some(Self::Protection),
            "Defence" => Some(Self::Defence),
            "Resilience" => Some(Self::Resilience),
            _ => None,
        }
    }
}

/// Structured attributes classified from a control's marker lines.
///
/// Field names follow the attribute table headings in the source
/// documents. All fields are optional; a field appears only when at
/// least one of its tokens was present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAttributes {
    #[serde(rename = "ControlType", default, skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ControlType>,

    #[serde(
        rename = "InformationSecurityProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub information_security_properties: Option<Vec<InformationSecurityProperty>>,

    #[serde(
        rename = "CybersecurityConcepts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cybersecurity_concepts: Option<Vec<CybersecurityConcept>>,

    #[serde(
        rename = "OperationalCapabilities",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operational_capabilities: Option<Vec<OperationalCapability>>,

    #[serde(
        rename = "SecurityDomains",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_domains: Option<Vec<SecurityDomain>>,
}

impl ControlAttributes {
    fn is_empty(&self) -> bool {
        self.control_type.is_none()
            && self.information_security_properties.is_none()
            && self.cybersecurity_concepts.is_none()
            && self.operational_capabilities.is_none()
            && self.security_domains.is_none()
    }
}

fn push_unique<T: PartialEq>(slot: &mut Option<Vec<T>>, value: T) {
    let values = slot.get_or_insert_with(Vec::new);
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Classify marker lines into structured attributes.
///
/// The lines are concatenated and split on `#`; each fragment is
/// trimmed and matched against every vocabulary. Repeated tokens are
/// recorded once, in first-seen order; for the single-valued control
/// type the last occurrence wins. Returns `None` when no token
/// matched.
#[must_use]
pub fn classify_markers(markers: &[String]) -> Option<ControlAttributes> {
    let mut attributes = ControlAttributes::default();

    for token in markers.concat().split('#') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some(control_type) = ControlType::from_token(token) {
            attributes.control_type = Some(control_type);
        }
        if let Some(property) = InformationSecurityProperty::from_token(token) {
            push_unique(&mut attributes.information_security_properties, property);
        }
        if let Some(concept) = CybersecurityConcept::from_token(token) {
            push_unique(&mut attributes.cybersecurity_concepts, concept);
        }
        if let Some(capability) = OperationalCapability::from_token(token) {
            push_unique(&mut attributes.operational_capabilities, capability);
        }
        if let Some(domain) = SecurityDomain::from_token(token) {
            push_unique(&mut attributes.security_domains, domain);
        }
    }

    if attributes.is_empty() {
        None
    } else {
        Some(attributes)
    }
}
