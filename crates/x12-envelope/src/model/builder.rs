//! Builder API for envelope configuration.
//!
//! Provides a fluent interface for assembling every parameter an envelope
//! needs. Routing ids, control numbers and the group version are required;
//! only X12 structural constants have defaults.
//!
//! # Example
//!
//! ```rust
//! use x12_envelope::{ControlNumber, EnvelopeBuilder, UsageIndicator};
//!
//! let config = EnvelopeBuilder::new("CLINIC01", "PAYER01")
//!     .control_number(ControlNumber::new(1).unwrap())
//!     .functional_id_code("HC")
//!     .version("005010X", "222", "A1")
//!     .usage(UsageIndicator::Production)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.group.version, "005010X222A1");
//! ```

use chrono::{NaiveDateTime, Timelike};

use crate::error::ValueError;
use crate::limits::{
    ISA_VERSION, MUTUALLY_DEFINED_QUALIFIER, NO_INFORMATION_QUALIFIER, RESPONSIBLE_AGENCY,
};
use crate::model::{
    ControlNumber, Delimiters, FunctionalGroup, GroupHeader, Interchange, InterchangeHeader,
    TransactionSet, UsageIndicator,
};

/// Interchange-level (ISA) parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterchangeParams {
    /// ISA01.
    pub authorization_qualifier: String,
    /// ISA02, unpadded.
    pub authorization: String,
    /// ISA03.
    pub security_qualifier: String,
    /// ISA04, unpadded.
    pub security: String,
    /// ISA05.
    pub sender_qualifier: String,
    /// ISA06, unpadded.
    pub sender_id: String,
    /// ISA07.
    pub receiver_qualifier: String,
    /// ISA08, unpadded.
    pub receiver_id: String,
    /// ISA12.
    pub version: String,
    /// ISA13.
    pub control_number: ControlNumber,
    /// ISA14.
    pub acknowledgment_requested: bool,
    /// ISA15.
    pub usage: UsageIndicator,
}

/// Group-level (GS) parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParams {
    /// GS01.
    pub functional_id_code: String,
    /// GS02.
    pub sender_id: String,
    /// GS03.
    pub receiver_id: String,
    /// GS06.
    pub control_number: ControlNumber,
    /// GS07.
    pub responsible_agency: String,
    /// GS08: version, release and addenda concatenated.
    pub version: String,
}

/// Everything needed to envelope a batch of transaction sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeConfig {
    /// Delimiters declared in the ISA header and used for every segment.
    pub delimiters: Delimiters,
    /// ISA parameters.
    pub interchange: InterchangeParams,
    /// GS parameters.
    pub group: GroupParams,
}

impl EnvelopeConfig {
    /// Builds the ISA header for the instant `now`, truncated to the minute.
    pub fn interchange_header(&self, now: NaiveDateTime) -> InterchangeHeader {
        let now = truncate_to_minute(now);
        let p = &self.interchange;
        InterchangeHeader {
            authorization_qualifier: p.authorization_qualifier.clone(),
            authorization: p.authorization.clone(),
            security_qualifier: p.security_qualifier.clone(),
            security: p.security.clone(),
            sender_qualifier: p.sender_qualifier.clone(),
            sender_id: p.sender_id.clone(),
            receiver_qualifier: p.receiver_qualifier.clone(),
            receiver_id: p.receiver_id.clone(),
            date: now.date(),
            time: now.time(),
            version: p.version.clone(),
            control_number: p.control_number,
            acknowledgment_requested: p.acknowledgment_requested,
            usage: p.usage,
        }
    }

    /// Builds the GS header for the instant `now`, truncated to the minute.
    pub fn group_header(&self, now: NaiveDateTime) -> GroupHeader {
        let now = truncate_to_minute(now);
        let p = &self.group;
        GroupHeader {
            functional_id_code: p.functional_id_code.clone(),
            sender_id: p.sender_id.clone(),
            receiver_id: p.receiver_id.clone(),
            date: now.date(),
            time: now.time(),
            control_number: p.control_number,
            responsible_agency: p.responsible_agency.clone(),
            version: p.version.clone(),
        }
    }

    /// Wraps `transaction_sets` in a group and interchange stamped with `now`.
    pub fn envelope(&self, transaction_sets: Vec<TransactionSet>, now: NaiveDateTime) -> Interchange {
        Interchange {
            delimiters: self.delimiters,
            header: self.interchange_header(now),
            group: FunctionalGroup {
                header: self.group_header(now),
                transaction_sets,
            },
        }
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

/// Builder for constructing an [`EnvelopeConfig`].
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    sender_id: String,
    receiver_id: String,
    sender_qualifier: String,
    receiver_qualifier: String,
    group_sender_id: Option<String>,
    group_receiver_id: Option<String>,
    authorization: (String, String),
    security: (String, String),
    interchange_control_number: Option<ControlNumber>,
    group_control_number: Option<ControlNumber>,
    functional_id_code: Option<String>,
    version: Option<String>,
    acknowledgment_requested: bool,
    usage: UsageIndicator,
    delimiters: Delimiters,
}

impl EnvelopeBuilder {
    /// Creates a builder routing from `sender_id` to `receiver_id`.
    ///
    /// The ids are used for both ISA06/ISA08 and GS02/GS03 unless the group
    /// ids are overridden.
    pub fn new(sender_id: impl Into<String>, receiver_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            sender_qualifier: MUTUALLY_DEFINED_QUALIFIER.to_string(),
            receiver_qualifier: MUTUALLY_DEFINED_QUALIFIER.to_string(),
            group_sender_id: None,
            group_receiver_id: None,
            authorization: (NO_INFORMATION_QUALIFIER.to_string(), String::new()),
            security: (NO_INFORMATION_QUALIFIER.to_string(), String::new()),
            interchange_control_number: None,
            group_control_number: None,
            functional_id_code: None,
            version: None,
            acknowledgment_requested: false,
            usage: UsageIndicator::Test,
            delimiters: Delimiters::X12_DEFAULT,
        }
    }

    /// Sets both the interchange and the group control number.
    pub fn control_number(mut self, control_number: ControlNumber) -> Self {
        self.interchange_control_number = Some(control_number);
        self.group_control_number = Some(control_number);
        self
    }

    /// Sets the ISA13/IEA02 control number.
    pub fn interchange_control_number(mut self, control_number: ControlNumber) -> Self {
        self.interchange_control_number = Some(control_number);
        self
    }

    /// Sets the GS06/GE02 control number.
    pub fn group_control_number(mut self, control_number: ControlNumber) -> Self {
        self.group_control_number = Some(control_number);
        self
    }

    /// Sets the ISA05/ISA07 id qualifiers.
    pub fn qualifiers(mut self, sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        self.sender_qualifier = sender.into();
        self.receiver_qualifier = receiver.into();
        self
    }

    /// Overrides the GS02/GS03 application ids.
    pub fn group_ids(mut self, sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        self.group_sender_id = Some(sender.into());
        self.group_receiver_id = Some(receiver.into());
        self
    }

    /// Sets ISA01/ISA02.
    pub fn authorization(mut self, qualifier: impl Into<String>, value: impl Into<String>) -> Self {
        self.authorization = (qualifier.into(), value.into());
        self
    }

    /// Sets ISA03/ISA04.
    pub fn security(mut self, qualifier: impl Into<String>, value: impl Into<String>) -> Self {
        self.security = (qualifier.into(), value.into());
        self
    }

    /// Sets the GS01 functional identifier code.
    pub fn functional_id_code(mut self, code: impl Into<String>) -> Self {
        self.functional_id_code = Some(code.into());
        self
    }

    /// Sets GS08 from its version, release/document number and addenda parts.
    pub fn version(mut self, version: &str, release: &str, addenda: &str) -> Self {
        self.version = Some(format!("{version}{release}{addenda}"));
        self
    }

    /// Sets the ISA15 usage indicator.
    pub fn usage(mut self, usage: UsageIndicator) -> Self {
        self.usage = usage;
        self
    }

    /// Sets the ISA14 acknowledgment flag.
    pub fn acknowledgment_requested(mut self, requested: bool) -> Self {
        self.acknowledgment_requested = requested;
        self
    }

    /// Sets the delimiters.
    pub fn delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Builds the configuration.
    ///
    /// Field widths are checked when encoding; this only fails on missing
    /// required parameters or invalid delimiters.
    pub fn build(self) -> Result<EnvelopeConfig, ValueError> {
        let interchange_control_number = self
            .interchange_control_number
            .ok_or(ValueError::MissingField { field: "ISA13" })?;
        let group_control_number = self
            .group_control_number
            .ok_or(ValueError::MissingField { field: "GS06" })?;
        let functional_id_code = self
            .functional_id_code
            .ok_or(ValueError::MissingField { field: "GS01" })?;
        let version = self.version.ok_or(ValueError::MissingField { field: "GS08" })?;
        self.delimiters.validate()?;

        Ok(EnvelopeConfig {
            delimiters: self.delimiters,
            interchange: InterchangeParams {
                authorization_qualifier: self.authorization.0,
                authorization: self.authorization.1,
                security_qualifier: self.security.0,
                security: self.security.1,
                sender_qualifier: self.sender_qualifier,
                sender_id: self.sender_id.clone(),
                receiver_qualifier: self.receiver_qualifier,
                receiver_id: self.receiver_id.clone(),
                version: ISA_VERSION.to_string(),
                control_number: interchange_control_number,
                acknowledgment_requested: self.acknowledgment_requested,
                usage: self.usage,
            },
            group: GroupParams {
                functional_id_code,
                sender_id: self.group_sender_id.unwrap_or(self.sender_id),
                receiver_id: self.group_receiver_id.unwrap_or(self.receiver_id),
                control_number: group_control_number,
                responsible_agency: RESPONSIBLE_AGENCY.to_string(),
                version,
            },
        })
    }
}
