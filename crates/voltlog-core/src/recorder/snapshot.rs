//! Sampled signal snapshots.

use crate::recorder::DecodedSignals;

/// Fault summary used when the decoded state reports no faults.
const NO_FAULTS: &str = "None";

/// CSV column names, in the exact order [`Snapshot::csv_fields`] emits.
pub const CSV_COLUMNS: [&str; 20] = [
    "Timestamp",
    "SOC (%)",
    "Battery Current (A)",
    "Cell Voltage Min (V)",
    "Cell Voltage Max (V)",
    "Cell Temp Min (C)",
    "Cell Temp Max (C)",
    "Available Energy (kWh)",
    "Charge Limit (A)",
    "Discharge Limit (A)",
    "Controller Temp (C)",
    "Motor Temp (C)",
    "RMS Current (A)",
    "Throttle (%)",
    "Brake (%)",
    "Speed (km/h)",
    "Motor RPM",
    "Capacitor Voltage (V)",
    "Odometer (km)",
    "Faults",
];

/// One sampled reading of the decoded vehicle signals.
///
/// Produced by the periodic sampler from whatever decoded state is
/// current at tick time, never from a specific frame. Absent numeric
/// signals default to 0; an empty fault list becomes `"None"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Localized wall-clock timestamp, used as-is in CSV rows.
    pub timestamp: String,
    /// State of charge, percent.
    pub soc: f64,
    /// Battery pack current, amps.
    pub battery_current: f64,
    /// Minimum cell voltage, volts.
    pub cell_voltage_min: f64,
    /// Maximum cell voltage, volts.
    pub cell_voltage_max: f64,
    /// Minimum cell temperature, degrees C.
    pub cell_temp_min: f64,
    /// Maximum cell temperature, degrees C.
    pub cell_temp_max: f64,
    /// Remaining available energy, kWh.
    pub available_energy: f64,
    /// Maximum charge current, amps.
    pub charge_limit: f64,
    /// Maximum discharge current, amps.
    pub discharge_limit: f64,
    /// Controller heatsink temperature, degrees C.
    pub controller_temp: f64,
    /// Motor winding temperature, degrees C.
    pub motor_temp: f64,
    /// RMS phase current, amps.
    pub rms_current: f64,
    /// Throttle position, percent.
    pub throttle: f64,
    /// Brake position, percent.
    pub brake: f64,
    /// Vehicle speed, km/h.
    pub speed: f64,
    /// Motor speed, RPM.
    pub motor_rpm: f64,
    /// DC link capacitor voltage, volts.
    pub capacitor_voltage: f64,
    /// Odometer reading, km.
    pub odometer: f64,
    /// Fault summary, `"None"` when no faults are present.
    pub faults: String,
}

impl Snapshot {
    /// Sample the current decoded state at the given wall-clock time.
    pub fn sample(decoded: &DecodedSignals, timestamp: String) -> Self {
        let battery = decoded.battery.clone().unwrap_or_default();
        let cells = decoded.cells.clone().unwrap_or_default();
        let limits = decoded.limits.clone().unwrap_or_default();
        let controller = decoded.controller.clone().unwrap_or_default();
        let motor = decoded.motor.clone().unwrap_or_default();
        let trip = decoded.trip.clone().unwrap_or_default();

        let faults = match decoded.faults.as_deref() {
            Some(labels) if !labels.is_empty() => labels.join("; "),
            _ => NO_FAULTS.to_string(),
        };

        Self {
            timestamp,
            soc: battery.soc.unwrap_or(0.0),
            battery_current: battery.current.unwrap_or(0.0),
            cell_voltage_min: cells.voltage_min.unwrap_or(0.0),
            cell_voltage_max: cells.voltage_max.unwrap_or(0.0),
            cell_temp_min: cells.temp_min.unwrap_or(0.0),
            cell_temp_max: cells.temp_max.unwrap_or(0.0),
            available_energy: battery.available_energy.unwrap_or(0.0),
            charge_limit: limits.charge.unwrap_or(0.0),
            discharge_limit: limits.discharge.unwrap_or(0.0),
            controller_temp: controller.controller_temp.unwrap_or(0.0),
            motor_temp: controller.motor_temp.unwrap_or(0.0),
            rms_current: controller.rms_current.unwrap_or(0.0),
            throttle: controller.throttle.unwrap_or(0.0),
            brake: controller.brake.unwrap_or(0.0),
            speed: motor.speed.unwrap_or(0.0),
            motor_rpm: motor.rpm.unwrap_or(0.0),
            capacitor_voltage: controller.capacitor_voltage.unwrap_or(0.0),
            odometer: trip.odometer.unwrap_or(0.0),
            faults,
        }
    }

    /// Field values in [`CSV_COLUMNS`] order.
    pub fn csv_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.soc.to_string(),
            self.battery_current.to_string(),
            self.cell_voltage_min.to_string(),
            self.cell_voltage_max.to_string(),
            self.cell_temp_min.to_string(),
            self.cell_temp_max.to_string(),
            self.available_energy.to_string(),
            self.charge_limit.to_string(),
            self.discharge_limit.to_string(),
            self.controller_temp.to_string(),
            self.motor_temp.to_string(),
            self.rms_current.to_string(),
            self.throttle.to_string(),
            self.brake.to_string(),
            self.speed.to_string(),
            self.motor_rpm.to_string(),
            self.capacitor_voltage.to_string(),
            self.odometer.to_string(),
            self.faults.clone(),
        ]
    }
}
