// src/config/constants.rs
//! Controller-wide constants and device attribute names

/// Acquisition limits and defaults
pub mod acquisition {
    /// Fixed sampling rate of the Beckhoff ADC terminal
    pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 1000;

    /// Device buffer capacity of the buffered firmware, in raw samples
    pub const DEFAULT_MAX_LENGTH: usize = 100_000;
    /// Device buffer capacity of the start-flag firmware, in raw samples
    pub const START_FLAG_MAX_LENGTH: usize = 10_000;

    pub const DEFAULT_MAX_CHANNELS: usize = 16;
    pub const START_FLAG_MAX_CHANNELS: usize = 3;

    /// Value the device leaves in array slots it has not written yet
    pub const UNPOPULATED_SENTINEL: f64 = 0.0;
}

/// Attribute names exposed by the buffered firmware
pub mod buffered {
    pub const ATTR_BUFFER_SIZE: &str = "ADCBufferSize";
    pub const ATTR_BUFFER_INDEX: &str = "ADC1BufferIndex";
    pub const ATTR_PREPARE: &str = "ADCPrepare";
    pub const ATTR_START: &str = "ADCStart";
    pub const ATTR_STOP: &str = "ADCStop";
    pub const ATTR_STATE: &str = "ADC1BufferState";
    pub const DEFAULT_SOURCE: &str = "MAIN.ADC1.valuebuffer.values";

    pub const READY_CODES: &[i64] = &[1, 3];
    pub const ACQUIRING_CODES: &[i64] = &[2];
}

/// Attribute names exposed by the older start-flag firmware
pub mod start_flag {
    pub const ATTR_BUFFER_SIZE: &str = "fast.femto1.target_index";
    pub const ATTR_START: &str = "fast.femto1_start";
    pub const ATTR_RESET: &str = "fast.femto1_reset";
    pub const DEFAULT_SOURCE: &str = "fast.femto1.femto_array1";

    /// 50 Hz line filter setup written once on connect
    pub const ATTR_FILTER_CH1: &str = "main.write_filter_elm_ch1.nValue";
    pub const ATTR_FILTER_CH2: &str = "main.write_filter_elm_ch2.nValue";
    pub const ATTR_FILTER_EXECUTE: &str = "main.write_filter_elm_execute";
    pub const FILTER_50HZ: i64 = 1;

    pub const READY_CODES: &[i64] = &[0];
    pub const ACQUIRING_CODES: &[i64] = &[1];
}

/// Configuration discovery
pub mod paths {
    pub const DEFAULT_DEVICE_NAME: &str = "domain/family/member";
    pub const DEFAULT_CONFIG_FILE: &str = "adc-sync.toml";
    pub const ENV_PREFIX: &str = "ADC_SYNC";
    pub const ENV_SEPARATOR: &str = "__";
}
