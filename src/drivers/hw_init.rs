//! One-shot hardware peripheral initialization.
//!
//! Configures the probe ADC channels and the uplink UART using raw
//! ESP-IDF sys calls. Called once from `main()` before the sampling
//! loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    UartConfigFailed(i32),
    UartInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)     => write!(f, "ADC1 init failed (rc={})", rc),
            Self::UartConfigFailed(rc)  => write!(f, "UART config failed (rc={})", rc),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

pub const ADC1_CH_PH: u32 = 3;
pub const ADC1_CH_TURBIDITY: u32 = 4;
pub const ADC1_CH_TEMP: u32 = 8;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_adc()?;
        init_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: pins::PROBE_ADC_ATTEN,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_PH, ADC1_CH_TURBIDITY, ADC1_CH_TEMP] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!("hw_init: ADC1 configured (CH3=pH, CH4=turbidity, CH8=temp)");
    Ok(())
}

/// One oneshot conversion.  A failed read returns 0, which the sampler
/// clamps like any other out-of-range value.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        log::debug!("adc1_read(ch{}) failed (rc={})", channel, ret);
        return 0;
    }
    raw.clamp(0, i32::from(u16::MAX)) as u16
}

// ── UART (uplink) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UPLINK_UART: uart_port_t = 1;
#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;
#[cfg(target_os = "espidf")]
const UART_TX_BUF: i32 = 512;
/// Upper bound on waiting for the TX FIFO to drain.
#[cfg(target_os = "espidf")]
const UART_TX_DONE_TICKS: u32 = 100;

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::UPLINK_UART_BAUD as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let ret = unsafe { uart_param_config(UPLINK_UART, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(
            UPLINK_UART,
            pins::UPLINK_UART_TX_GPIO,
            pins::UPLINK_UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }

    let ret = unsafe {
        uart_driver_install(UPLINK_UART, UART_RX_BUF, UART_TX_BUF, 0, core::ptr::null_mut(), 0)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInstallFailed(ret)); }

    info!(
        "hw_init: uplink UART{} at {} baud (TX={}, RX={})",
        UPLINK_UART, pins::UPLINK_UART_BAUD, pins::UPLINK_UART_TX_GPIO, pins::UPLINK_UART_RX_GPIO
    );
    Ok(())
}

/// Queue bytes on the uplink UART.  Returns the number accepted.
#[cfg(target_os = "espidf")]
pub fn uart_write(data: &[u8]) -> Result<usize, i32> {
    // SAFETY: driver installed in init_uart(); the buffer outlives the call.
    let n = unsafe { uart_write_bytes(UPLINK_UART, data.as_ptr().cast(), data.len()) };
    if n < 0 { Err(n) } else { Ok(n as usize) }
}

/// Block until the TX FIFO has drained (bounded).
#[cfg(target_os = "espidf")]
pub fn uart_wait_tx_done() -> Result<(), i32> {
    // SAFETY: driver installed in init_uart().
    let ret = unsafe { uart_wait_tx_done(UPLINK_UART, UART_TX_DONE_TICKS) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}
