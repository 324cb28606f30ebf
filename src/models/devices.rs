//! Ship subsystems and their damage state

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    WarpEngines,
    ImpulseEngines,
    ShortRangeSensors,
    LongRangeSensors,
    Phasers,
    PhotonTubes,
    LifeSupport,
    Shields,
    Computer,
    SubspaceRadio,
    Transporter,
    ShuttleCraft,
    DeathRay,
}

impl DeviceType {
    pub const ALL: [DeviceType; 13] = [
        DeviceType::WarpEngines,
        DeviceType::ImpulseEngines,
        DeviceType::ShortRangeSensors,
        DeviceType::LongRangeSensors,
        DeviceType::Phasers,
        DeviceType::PhotonTubes,
        DeviceType::LifeSupport,
        DeviceType::Shields,
        DeviceType::Computer,
        DeviceType::SubspaceRadio,
        DeviceType::Transporter,
        DeviceType::ShuttleCraft,
        DeviceType::DeathRay,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeviceType::WarpEngines => "Warp Engines",
            DeviceType::ImpulseEngines => "Impulse Engines",
            DeviceType::ShortRangeSensors => "S.R. Sensors",
            DeviceType::LongRangeSensors => "L.R. Sensors",
            DeviceType::Phasers => "Phasers",
            DeviceType::PhotonTubes => "Photon Tubes",
            DeviceType::LifeSupport => "Life Support",
            DeviceType::Shields => "Shields",
            DeviceType::Computer => "Computer",
            DeviceType::SubspaceRadio => "Subspace Radio",
            DeviceType::Transporter => "Transporter",
            DeviceType::ShuttleCraft => "Shuttle Craft",
            DeviceType::DeathRay => "Death Ray",
        }
    }

    /// The experimental weapon is only serviced at a starbase.
    pub fn repairs_only_when_docked(&self) -> bool {
        matches!(self, DeviceType::DeathRay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Up,
    Down,
    Damaged,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    /// Stardates of repair work remaining.
    pub damage: f64,
}

impl Device {
    pub fn new(device_type: DeviceType) -> Self {
        Device {
            device_type,
            status: DeviceStatus::Up,
            damage: 0.0,
        }
    }

    pub fn is_damaged(&self) -> bool {
        self.status == DeviceStatus::Damaged
    }
}

/// The fixed table of ship devices, one entry per `DeviceType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Devices {
    devices: Vec<Device>,
}

impl Default for Devices {
    fn default() -> Self {
        Self::new()
    }
}

impl Devices {
    pub fn new() -> Self {
        Devices {
            devices: DeviceType::ALL.iter().map(|t| Device::new(*t)).collect(),
        }
    }

    fn slot(device_type: DeviceType) -> usize {
        device_type as usize
    }

    pub fn get(&self, device_type: DeviceType) -> &Device {
        &self.devices[Self::slot(device_type)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn status(&self, device_type: DeviceType) -> DeviceStatus {
        self.get(device_type).status
    }

    pub fn is_damaged(&self, device_type: DeviceType) -> bool {
        self.get(device_type).is_damaged()
    }

    pub fn set_status(&mut self, device_type: DeviceType, status: DeviceStatus) {
        self.devices[Self::slot(device_type)].status = status;
    }

    pub fn set_damage(&mut self, device_type: DeviceType, damage: f64) {
        self.devices[Self::slot(device_type)].damage = damage.max(0.0);
    }

    /// Mark a device damaged for `duration` more stardates of repair work.
    pub fn damage(&mut self, device_type: DeviceType, duration: f64) {
        let device = &mut self.devices[Self::slot(device_type)];
        device.damage += duration.max(0.0);
        device.status = DeviceStatus::Damaged;
    }

    /// Work off `elapsed` stardates of damage on one device. A device whose
    /// damage reaches zero comes back Up.
    pub fn repair(&mut self, device_type: DeviceType, elapsed: f64, docked: bool) {
        if device_type.repairs_only_when_docked() && !docked {
            return;
        }
        let device = &mut self.devices[Self::slot(device_type)];
        if device.status != DeviceStatus::Damaged {
            return;
        }
        device.damage = (device.damage - elapsed).max(0.0);
        if device.damage == 0.0 {
            device.status = DeviceStatus::Up;
        }
    }

    pub fn repair_all(&mut self, elapsed: f64, docked: bool) -> Vec<DeviceType> {
        let mut restored = Vec::new();
        for device_type in DeviceType::ALL {
            let was_damaged = self.is_damaged(device_type);
            self.repair(device_type, elapsed, docked);
            if was_damaged && !self.is_damaged(device_type) {
                restored.push(device_type);
            }
        }
        restored
    }

    pub fn damaged(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| d.is_damaged())
    }
}
