use std::fmt;

/// Failure classes of a generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind
{   Network
  , Decode
  , Protocol
  , Unknown
  , InvalidConfiguration
}

/// Custom error type for story generation
/// Implements Clone so the last failure can outlive its attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Transport failure: connect, DNS, timeout, HTTP status, body read
    Network(String)
  , /// Response body is not valid JSON
    Decode(String)
  , /// Valid JSON without the expected `response` field
    Protocol(String)
  , /// Anything the other classes do not cover
    Unknown(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::Network(_) => ErrorKind::Network
          , Error::Decode(_) => ErrorKind::Decode
          , Error::Protocol(_) => ErrorKind::Protocol
          , Error::Unknown(_) => ErrorKind::Unknown
          , Error::InvalidConfiguration(_) => {
              ErrorKind::InvalidConfiguration
            }
        }
    }

    /// Only network failures are worth another attempt
    pub fn is_retryable(&self) -> bool
    {   self.kind() == ErrorKind::Network
    }

    /// Classify a reqwest failure
    pub fn from_transport(err: &reqwest::Error) -> Self
    {   if err.is_timeout()
        {   return Error::Network(
              format!("request timed out: {}", err)
            );
        }
        if err.is_decode()
        {   return Error::Decode(err.to_string());
        }
        if err.is_builder()
        {   return Error::Unknown(err.to_string());
        }
        Error::Network(err.to_string())
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Network(msg) => {
              write!(f, "Network error: {}", msg)
            }
          , Error::Decode(msg) => {
              write!(f, "JSON decode error: {}", msg)
            }
          , Error::Protocol(msg) => {
              write!(f, "{}", msg)
            }
          , Error::Unknown(msg) => {
              write!(f, "Unexpected error: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Unknown(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Unknown(s.to_string())
    }
}
