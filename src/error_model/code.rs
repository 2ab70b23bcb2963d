//! Closed enumeration of error codes.

use std::fmt;

/// Stable error codes returned by the iModels API, plus the client-side
/// sentinels `Unrecognized` (failure never produced a structured body) and
/// `Unknown` (a response arrived but could not be interpreted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    Unrecognized,
    Unknown,

    Unauthorized,
    InsufficientPermissions,

    RateLimitExceeded,
    TooManyRequests,

    InvalidIModelsRequest,
    InvalidValue,
    InvalidHeaderValue,
    InvalidRequestBody,
    MissingRequiredProperty,
    MissingRequiredParameter,
    MissingRequiredHeader,
    MutuallyExclusivePropertiesProvided,

    DataConflict,
    ConflictWithAnotherUser,
    NewerChangesExist,
    IModelExists,
    NamedVersionExists,
    ChangesetExists,

    ITwinNotFound,
    IModelNotFound,
    ChangesetNotFound,
    NamedVersionNotFound,
    BriefcaseNotFound,
    CheckpointNotFound,
    UserNotFound,
    FileNotFound,
    BaselineFileNotFound,

    BaselineFileInitializationFailed,
    IModelInitializationTimedOut,
    ChangesetDownloadFailed,
    DownloadAborted,
}

impl ApiErrorCode {
    /// Maps a wire code string to a known code; anything unrecognized
    /// coerces to the `Unrecognized` sentinel.
    ///
    /// The service spells the request-validity code with a lowercase "i"
    /// ("InvalidiModelsRequest"); both spellings are accepted.
    pub fn from_wire(code: &str) -> Self {
        match code {
            "Unknown" => Self::Unknown,
            "Unauthorized" => Self::Unauthorized,
            "InsufficientPermissions" => Self::InsufficientPermissions,
            "RateLimitExceeded" => Self::RateLimitExceeded,
            "TooManyRequests" => Self::TooManyRequests,
            "InvalidiModelsRequest" | "InvalidIModelsRequest" => Self::InvalidIModelsRequest,
            "InvalidValue" => Self::InvalidValue,
            "InvalidHeaderValue" => Self::InvalidHeaderValue,
            "InvalidRequestBody" => Self::InvalidRequestBody,
            "MissingRequiredProperty" => Self::MissingRequiredProperty,
            "MissingRequiredParameter" => Self::MissingRequiredParameter,
            "MissingRequiredHeader" => Self::MissingRequiredHeader,
            "MutuallyExclusivePropertiesProvided" => Self::MutuallyExclusivePropertiesProvided,
            "DataConflict" => Self::DataConflict,
            "ConflictWithAnotherUser" => Self::ConflictWithAnotherUser,
            "NewerChangesExist" => Self::NewerChangesExist,
            "iModelExists" | "IModelExists" => Self::IModelExists,
            "NamedVersionExists" => Self::NamedVersionExists,
            "ChangesetExists" => Self::ChangesetExists,
            "iTwinNotFound" | "ITwinNotFound" => Self::ITwinNotFound,
            "iModelNotFound" | "IModelNotFound" => Self::IModelNotFound,
            "ChangesetNotFound" => Self::ChangesetNotFound,
            "NamedVersionNotFound" => Self::NamedVersionNotFound,
            "BriefcaseNotFound" => Self::BriefcaseNotFound,
            "CheckpointNotFound" => Self::CheckpointNotFound,
            "UserNotFound" => Self::UserNotFound,
            "FileNotFound" => Self::FileNotFound,
            "BaselineFileNotFound" => Self::BaselineFileNotFound,
            "BaselineFileInitializationFailed" => Self::BaselineFileInitializationFailed,
            "iModelInitializationTimedOut" | "IModelInitializationTimedOut" => {
                Self::IModelInitializationTimedOut
            }
            "ChangesetDownloadFailed" => Self::ChangesetDownloadFailed,
            "DownloadAborted" => Self::DownloadAborted,
            _ => Self::Unrecognized,
        }
    }

    /// Canonical name, used in composed error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unrecognized => "Unrecognized",
            Self::Unknown => "Unknown",
            Self::Unauthorized => "Unauthorized",
            Self::InsufficientPermissions => "InsufficientPermissions",
            Self::RateLimitExceeded => "RateLimitExceeded",
            Self::TooManyRequests => "TooManyRequests",
            Self::InvalidIModelsRequest => "InvalidIModelsRequest",
            Self::InvalidValue => "InvalidValue",
            Self::InvalidHeaderValue => "InvalidHeaderValue",
            Self::InvalidRequestBody => "InvalidRequestBody",
            Self::MissingRequiredProperty => "MissingRequiredProperty",
            Self::MissingRequiredParameter => "MissingRequiredParameter",
            Self::MissingRequiredHeader => "MissingRequiredHeader",
            Self::MutuallyExclusivePropertiesProvided => "MutuallyExclusivePropertiesProvided",
            Self::DataConflict => "DataConflict",
            Self::ConflictWithAnotherUser => "ConflictWithAnotherUser",
            Self::NewerChangesExist => "NewerChangesExist",
            Self::IModelExists => "IModelExists",
            Self::NamedVersionExists => "NamedVersionExists",
            Self::ChangesetExists => "ChangesetExists",
            Self::ITwinNotFound => "ITwinNotFound",
            Self::IModelNotFound => "IModelNotFound",
            Self::ChangesetNotFound => "ChangesetNotFound",
            Self::NamedVersionNotFound => "NamedVersionNotFound",
            Self::BriefcaseNotFound => "BriefcaseNotFound",
            Self::CheckpointNotFound => "CheckpointNotFound",
            Self::UserNotFound => "UserNotFound",
            Self::FileNotFound => "FileNotFound",
            Self::BaselineFileNotFound => "BaselineFileNotFound",
            Self::BaselineFileInitializationFailed => "BaselineFileInitializationFailed",
            Self::IModelInitializationTimedOut => "IModelInitializationTimedOut",
            Self::ChangesetDownloadFailed => "ChangesetDownloadFailed",
            Self::DownloadAborted => "DownloadAborted",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
