// libpn532/src/device/handle.rs

use std::time::Duration;

use log::{debug, info};
use tokio::runtime::Handle;

use crate::card::{CardRecord, MifareSession};
use crate::device::config::DeviceConfig;
use crate::device::exchange::CommandExchange;
use crate::device::poller::{CardPoller, Subscription};
use crate::protocol::{
    Command, codec, decode_firmware_version, decode_in_list_passive_target,
    decode_sam_configuration,
};
use crate::transport::Transport;
use crate::types::{BaudRate, FirmwareVersion};
use crate::{Error, Result};

/// Type-state markers
#[derive(Debug)]
pub struct Uninitialized;

/// State carried once the chip has answered the start-up sequence.
#[derive(Debug)]
pub struct Initialized {
    firmware: FirmwareVersion,
    poller: CardPoller,
}

/// Device handle that enforces initialization state at compile time.
#[derive(Debug)]
pub struct Device<State = Uninitialized> {
    exchange: CommandExchange,
    config: DeviceConfig,
    state: State,
}

impl Device<Uninitialized> {
    /// Wrap a transport with the given configuration.
    pub fn new_with_transport(transport: Box<dyn Transport>, config: DeviceConfig) -> Result<Self> {
        config.validate()?;
        let exchange = CommandExchange::new(
            transport,
            config.exchange_timeout,
            config.ready_poll_interval,
        );
        Ok(Self {
            exchange,
            config,
            state: Uninitialized,
        })
    }

    /// Reset the chip, wait for it to wake up, read its firmware version and
    /// put the SAM in normal mode. Any failure aborts start-up.
    ///
    /// Must run inside a tokio runtime; the card poller later spawns its
    /// loop on that same runtime.
    pub async fn initialize(self) -> Result<Device<Initialized>> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::invalid_argument(format!("no tokio runtime: {}", e)))?;

        self.exchange.reset().await?;
        tokio::time::sleep(self.config.wake_up_delay).await;

        let frame = self.exchange.exchange_queued(&Command::GetFirmwareVersion).await?;
        let firmware = decode_firmware_version(&frame)?;
        info!("found {}", firmware);

        let frame = self.exchange.exchange_queued(&Command::sam_normal()).await?;
        decode_sam_configuration(&frame)?;
        debug!("SAM configured, device ready");

        let poller = CardPoller::new(
            self.exchange.clone(),
            runtime,
            self.config.poll_period,
            self.config.poll_baud,
            self.config.list_target_reply_len,
        );

        Ok(Device {
            exchange: self.exchange,
            config: self.config,
            state: Initialized { firmware, poller },
        })
    }
}

impl<S> Device<S> {
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Change the exchange timeout; takes effect from the next exchange.
    pub fn set_exchange_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.exchange.set_timeout(timeout)?;
        self.config.exchange_timeout = timeout;
        Ok(())
    }
}

impl Device<Initialized> {
    pub fn firmware_version(&self) -> &FirmwareVersion {
        &self.state.firmware
    }

    /// Exchange `cmd` and return the validated reply frame (preamble
    /// onwards). Fails with `Busy` if another exchange is in flight.
    pub async fn exchange(&self, cmd: &Command) -> Result<Vec<u8>> {
        self.exchange.exchange(cmd).await
    }

    /// Exchange `cmd` and return the reply data following the response code.
    pub async fn execute(&self, cmd: &Command) -> Result<Vec<u8>> {
        let frame = self.exchange.exchange(cmd).await?;
        codec::decode_response_frame(cmd, &frame)
    }

    /// One-shot InListPassiveTarget for a single card. Fails with `Busy`
    /// while a poll cycle or another call holds the chip.
    pub async fn read_passive_target(&self, baud: BaudRate) -> Result<CardRecord> {
        let cmd = Command::list_passive_target(baud);
        let frame = self
            .exchange
            .exchange_with_len(&cmd, self.config.list_target_reply_len)
            .await?;
        decode_in_list_passive_target(&frame)
    }

    pub fn poller(&self) -> &CardPoller {
        &self.state.poller
    }

    /// Shortcut for `poller().subscribe()`.
    pub fn subscribe(&self) -> Subscription {
        self.state.poller.subscribe()
    }

    pub fn set_poll_period(&mut self, period: Duration) -> Result<()> {
        self.state.poller.set_poll_period(period)?;
        self.config.poll_period = period;
        Ok(())
    }

    /// Mifare Classic access sharing this device's exchange.
    pub fn mifare(&self) -> MifareSession {
        MifareSession::new(self.exchange.clone())
    }

    pub fn exchange_handle(&self) -> &CommandExchange {
        &self.exchange
    }
}
