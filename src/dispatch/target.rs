use std::fmt;

/// Naming scheme used to resolve a message destination into a target.
///
/// The destination token is appended to `service_base` to form the service
/// name; every other coordinate is shared by all destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Prefix joined with the destination, separated by `.`.
    pub service_base: String,
    /// Object path the message is delivered to.
    pub object_path: String,
    /// Interface exposing the delivery method.
    pub interface: String,
    /// Method invoked with `(source, payload)`.
    pub method: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            service_base: "io.pushwire.ExtAppMsg".to_owned(),
            object_path: "/io/pushwire/ExtAppMsg".to_owned(),
            interface: "io.pushwire.ExtAppMsg".to_owned(),
            method: "pushMessage".to_owned(),
        }
    }
}

impl DispatchConfig {
    /// Resolve the target for `destination`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pushwire::dispatch::DispatchConfig;
    /// let target = DispatchConfig::default().resolve("weather");
    /// assert_eq!(target.service(), "io.pushwire.ExtAppMsg.weather");
    /// assert_eq!(target.method(), "pushMessage");
    /// ```
    #[must_use]
    pub fn resolve(&self, destination: &str) -> DispatchTarget {
        DispatchTarget {
            service: format!("{}.{destination}", self.service_base),
            object_path: self.object_path.clone(),
            interface: self.interface.clone(),
            method: self.method.clone(),
        }
    }
}

/// Fully resolved delivery coordinates for one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchTarget {
    service: String,
    object_path: String,
    interface: String,
    method: String,
}

impl DispatchTarget {
    /// Service name, including the destination suffix.
    #[must_use]
    pub fn service(&self) -> &str { &self.service }

    /// Object path on the service.
    #[must_use]
    pub fn object_path(&self) -> &str { &self.object_path }

    /// Interface exposing the method.
    #[must_use]
    pub fn interface(&self) -> &str { &self.interface }

    /// Method to invoke.
    #[must_use]
    pub fn method(&self) -> &str { &self.method }
}

impl fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}.{}",
            self.service, self.object_path, self.interface, self.method
        )
    }
}
