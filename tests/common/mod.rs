#![allow(dead_code)]

use std::collections::HashMap;
use std::net::Ipv4Addr;

use drone_r6_core::motor::{Motor, MotorDuty};
use drone_r6_core::network::StationConfig;
use drone_r6_core::storage::SettingString;
use drone_r6_core::{Frame, KeyValueStore, MotorOutput, OutputDriver, RadioDriver, WifiCredentials};

/// Output that records every frame it accepts
#[derive(Debug, Default)]
pub struct MockOutput {
    pub frames: Vec<Frame>,
    /// Writes with these indices fail
    pub fail_on: Vec<usize>,
    writes: usize,
}

impl MockOutput {
    pub fn failing_on(writes: &[usize]) -> Self {
        Self {
            fail_on: writes.to_vec(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFault;

impl OutputDriver for MockOutput {
    type Error = OutputFault;

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_on.contains(&index) {
            return Err(OutputFault);
        }
        self.frames.push(*frame);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    Connect(String),
    Disconnect,
    SetStaticIp(Ipv4Addr, Ipv4Addr, Ipv4Addr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioFault;

/// Radio that records requests and never raises events by itself
#[derive(Debug, Default)]
pub struct MockRadio {
    pub calls: Vec<RadioCall>,
    pub fail: bool,
}

impl MockRadio {
    pub fn connects(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RadioCall::Connect(_)))
            .count()
    }

    fn record(&mut self, call: RadioCall) -> Result<(), RadioFault> {
        if self.fail {
            return Err(RadioFault);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RadioDriver for MockRadio {
    type Error = RadioFault;

    fn connect(
        &mut self,
        credentials: &WifiCredentials,
        config: &StationConfig,
    ) -> Result<(), Self::Error> {
        assert_eq!(*config, StationConfig::DEFAULT);
        self.record(RadioCall::Connect(credentials.ssid.as_str().to_string()))
    }

    fn disconnect(&mut self) -> Result<(), Self::Error> {
        self.record(RadioCall::Disconnect)
    }

    fn set_static_ip(
        &mut self,
        ip: Ipv4Addr,
        gateway: Ipv4Addr,
        netmask: Ipv4Addr,
    ) -> Result<(), Self::Error> {
        self.record(RadioCall::SetStaticIp(ip, gateway, netmask))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stored {
    Str(String),
    Int(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFault;

/// In-memory key/value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub values: HashMap<String, Stored>,
    pub fail: bool,
    pub commits: usize,
}

impl MemoryStore {
    fn check(&self) -> Result<(), StoreFault> {
        if self.fail { Err(StoreFault) } else { Ok(()) }
    }
}

impl KeyValueStore for MemoryStore {
    type Error = StoreFault;

    fn get_str(&mut self, key: &str) -> Result<Option<SettingString>, Self::Error> {
        self.check()?;
        Ok(match self.values.get(key) {
            Some(Stored::Str(value)) => SettingString::try_from(value.as_str()).ok(),
            _ => None,
        })
    }

    fn set_str(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.check()?;
        self.values
            .insert(key.to_string(), Stored::Str(value.to_string()));
        Ok(())
    }

    fn get_i32(&mut self, key: &str) -> Result<Option<i32>, Self::Error> {
        self.check()?;
        Ok(match self.values.get(key) {
            Some(Stored::Int(value)) => Some(*value),
            _ => None,
        })
    }

    fn set_i32(&mut self, key: &str, value: i32) -> Result<(), Self::Error> {
        self.check()?;
        self.values.insert(key.to_string(), Stored::Int(value));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.commits += 1;
        Ok(())
    }
}

/// Motor outputs that remember the last duty per motor
#[derive(Debug, Default)]
pub struct MockMotors {
    pub left: MotorDuty,
    pub right: MotorDuty,
    pub writes: usize,
}

impl MotorOutput for MockMotors {
    type Error = ();

    fn set_duty(&mut self, motor: Motor, duty: MotorDuty) -> Result<(), Self::Error> {
        match motor {
            Motor::Left => self.left = duty,
            Motor::Right => self.right = duty,
        }
        self.writes += 1;
        Ok(())
    }
}
