use std::fmt;

use crate::error::ValidationError;

/// Transport used for the DNS exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Udp,
    Tcp,
}

impl Network {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Network::Udp => "udp",
            Network::Tcp => "tcp",
        }
    }

    /// Upper-case label used in the final report.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Network::Udp => "UDP",
            Network::Tcp => "TCP",
        }
    }
}

impl std::str::FromStr for Network {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "udp" => Ok(Network::Udp),
            "tcp" => Ok(Network::Tcp),
            _ => Err(ValidationError::InvalidNetwork {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record type carried in each probe's question section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Soa,
    Srv,
    Txt,
}

impl QueryType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryType::A => "A",
            QueryType::Aaaa => "AAAA",
            QueryType::Cname => "CNAME",
            QueryType::Mx => "MX",
            QueryType::Ns => "NS",
            QueryType::Ptr => "PTR",
            QueryType::Soa => "SOA",
            QueryType::Srv => "SRV",
            QueryType::Txt => "TXT",
        }
    }
}

impl std::str::FromStr for QueryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "A" => Ok(QueryType::A),
            "AAAA" => Ok(QueryType::Aaaa),
            "CNAME" => Ok(QueryType::Cname),
            "MX" => Ok(QueryType::Mx),
            "NS" => Ok(QueryType::Ns),
            "PTR" => Ok(QueryType::Ptr),
            "SOA" => Ok(QueryType::Soa),
            "SRV" => Ok(QueryType::Srv),
            "TXT" => Ok(QueryType::Txt),
            _ => Err(ValidationError::InvalidRecordType {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
