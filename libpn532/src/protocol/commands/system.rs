// libpn532/src/protocol/commands/system.rs

/// SAMConfiguration mode: normal, no SAM in use.
pub const SAM_MODE_NORMAL: u8 = 0x01;

/// Virtual-card timeout in 50 ms units; 0x14 = 1 s.
pub const SAM_DEFAULT_TIMEOUT: u8 = 0x14;

/// Encode GetFirmwareVersion parameters (none).
pub fn encode_get_firmware_version() -> Vec<u8> {
    Vec::new()
}

/// Encode SAMConfiguration parameters: mode, timeout, IRQ pin usage.
pub fn encode_sam_configuration(mode: u8, timeout: u8, use_irq: bool) -> Vec<u8> {
    vec![mode, timeout, use_irq as u8]
}
