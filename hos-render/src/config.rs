//! Carrier, driver and vehicle details printed on every sheet.

/// Header details that a schedule does not carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSheetConfig {
    /// Name of the carrier.
    pub carrier_name: String,
    /// Carrier's main office address.
    pub main_office_address: String,
    /// Driver printed in the signature box.
    pub driver_name: String,
    /// Co-driver, blank when driving solo.
    pub co_driver_name: String,
    /// Truck and trailer numbers.
    pub vehicle_number: String,
}

impl Default for LogSheetConfig {
    fn default() -> Self {
        Self {
            carrier_name: "Trucking Company".to_owned(),
            main_office_address: "Main Office Address".to_owned(),
            driver_name: "Driver Name".to_owned(),
            co_driver_name: String::new(),
            vehicle_number: "Vehicle #123".to_owned(),
        }
    }
}

impl LogSheetConfig {
    /// Set the carrier name.
    #[must_use]
    pub fn with_carrier_name(mut self, carrier_name: impl Into<String>) -> Self {
        self.carrier_name = carrier_name.into();
        self
    }

    /// Set the main office address.
    #[must_use]
    pub fn with_main_office_address(mut self, address: impl Into<String>) -> Self {
        self.main_office_address = address.into();
        self
    }

    /// Set the driver name.
    #[must_use]
    pub fn with_driver_name(mut self, driver_name: impl Into<String>) -> Self {
        self.driver_name = driver_name.into();
        self
    }

    /// Set the co-driver name.
    #[must_use]
    pub fn with_co_driver_name(mut self, co_driver_name: impl Into<String>) -> Self {
        self.co_driver_name = co_driver_name.into();
        self
    }

    /// Set the vehicle number.
    #[must_use]
    pub fn with_vehicle_number(mut self, vehicle_number: impl Into<String>) -> Self {
        self.vehicle_number = vehicle_number.into();
        self
    }
}
