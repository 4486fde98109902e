use std::fmt;

use crate::encoder::percent_encode;

/// A single name/value pair taking part in a signed request.
///
/// Ordering is byte-wise on `(name, value)`, so two parameters with the same
/// name are ordered by their value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestParameter {
    name: String,
    value: String,
}

impl RequestParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        RequestParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Both halves percent-encoded, ready to be sorted and joined.
    pub fn encoded(&self) -> EncodedParameter {
        EncodedParameter {
            name: percent_encode(&self.name),
            value: percent_encode(&self.value),
        }
    }
}

impl<K, V> From<(K, V)> for RequestParameter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from((k, v): (K, V)) -> Self {
        RequestParameter::new(k, v)
    }
}

/// A parameter after percent-encoding, as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EncodedParameter {
    pub name: String,
    pub value: String,
}

impl fmt::Display for EncodedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Anything parameters can be pushed into.
pub trait ParameterSink {
    fn add_parameter(&mut self, parameter: RequestParameter) -> &mut Self;

    fn add_pair<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.add_parameter(RequestParameter::new(name, value))
    }

    fn add_parameters<I, P>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RequestParameter>,
    {
        for p in parameters {
            self.add_parameter(p.into());
        }
        self
    }
}

impl ParameterSink for Vec<RequestParameter> {
    fn add_parameter(&mut self, parameter: RequestParameter) -> &mut Self {
        self.push(parameter);
        self
    }
}
