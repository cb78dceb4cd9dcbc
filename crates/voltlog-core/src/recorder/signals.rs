//! Decoded vehicle signal state.
//!
//! One tagged structure per CAN message group, replacing the loose
//! group-name-to-field map the upstream decoder pushes. Every leaf
//! field is optional; defaulting happens once, when a snapshot is
//! sampled, not here.

use serde::Deserialize;

/// Battery pack status signals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatteryStatus {
    /// State of charge, percent.
    pub soc: Option<f64>,
    /// Pack current, amps (positive = discharge).
    pub current: Option<f64>,
    /// Remaining available energy, kWh.
    pub available_energy: Option<f64>,
}

/// Per-cell extrema reported by the BMS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellStats {
    /// Minimum cell voltage, volts.
    pub voltage_min: Option<f64>,
    /// Maximum cell voltage, volts.
    pub voltage_max: Option<f64>,
    /// Minimum cell temperature, degrees C.
    pub temp_min: Option<f64>,
    /// Maximum cell temperature, degrees C.
    pub temp_max: Option<f64>,
}

/// BMS current limits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentLimits {
    /// Maximum charge current, amps.
    pub charge: Option<f64>,
    /// Maximum discharge current, amps.
    pub discharge: Option<f64>,
}

/// Motor controller status signals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerStatus {
    /// Controller heatsink temperature, degrees C.
    pub controller_temp: Option<f64>,
    /// Motor winding temperature, degrees C.
    pub motor_temp: Option<f64>,
    /// DC link capacitor voltage, volts.
    pub capacitor_voltage: Option<f64>,
    /// RMS phase current, amps.
    pub rms_current: Option<f64>,
    /// Throttle position, percent.
    pub throttle: Option<f64>,
    /// Brake position, percent.
    pub brake: Option<f64>,
}

/// Drive-unit motion signals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotorStatus {
    /// Motor speed, RPM.
    pub rpm: Option<f64>,
    /// Vehicle speed, km/h.
    pub speed: Option<f64>,
}

/// Trip counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TripStatus {
    /// Odometer reading, km.
    pub odometer: Option<f64>,
}

/// The most recent external decode result.
///
/// The recorder holds exactly one of these, overwritten wholesale on
/// each upstream update. No history is retained; the periodic sampler
/// reads whatever is current at tick time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecodedSignals {
    /// Battery pack group.
    pub battery: Option<BatteryStatus>,
    /// Cell extrema group.
    pub cells: Option<CellStats>,
    /// Current limit group.
    pub limits: Option<CurrentLimits>,
    /// Motor controller group.
    pub controller: Option<ControllerStatus>,
    /// Drive-unit motion group.
    pub motor: Option<MotorStatus>,
    /// Trip counter group.
    pub trip: Option<TripStatus>,
    /// Active fault labels, empty when none.
    pub faults: Option<Vec<String>>,
}
