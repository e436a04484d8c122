//! Event loop of the terminal widget.
//!
//! One task owns the `LookupController`. Input lines and fetch completions
//! are both events on that task and each is applied atomically; the HTTP
//! round trip itself runs on the blocking pool. Nothing cancels an
//! in-flight lookup, so with overlapping searches the last completion to
//! arrive is what gets rendered.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use ens_core::{
    ApiError, DateStyle, Dispatch, HttpResponse, LookupController, LookupMessage, Panel,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::transport::Transport;

const TITLE: &str = "ENS Lookup";
const PLACEHOLDER: &str = "Enter ENS name (e.g., vitalik.eth)";

struct Completion {
    ticket: u64,
    response: Result<HttpResponse, ApiError>,
}

pub struct App<T, W> {
    controller: LookupController,
    transport: Arc<T>,
    style: DateStyle,
    out: W,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<T: Transport, W: Write> App<T, W> {
    pub fn new(controller: LookupController, transport: T, style: DateStyle, out: W) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            transport: Arc::new(transport),
            style,
            out,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &LookupController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Look up each name in turn, waiting for one to finish before the next.
    pub async fn run_once(&mut self, names: &[String]) -> Result<()> {
        for name in names {
            self.search(name.clone())?;
            while self.in_flight > 0 {
                self.wait_for_completion().await?;
            }
        }
        Ok(())
    }

    /// Read one name per line until EOF, then drain outstanding lookups.
    pub async fn run_interactive<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out, "{PLACEHOLDER}")?;
        self.out.flush()?;

        let mut lines = input.lines();
        let mut eof = false;
        loop {
            if eof && self.in_flight == 0 {
                return Ok(());
            }
            tokio::select! {
                line = lines.next_line(), if !eof => match line? {
                    Some(line) => self.search(line)?,
                    None => eof = true,
                },
                Some(done) = self.completions_rx.recv() => self.complete(done)?,
            }
        }
    }

    /// Text change followed by a confirm action.
    fn search(&mut self, text: String) -> Result<()> {
        self.controller.update(LookupMessage::InputChanged(text));
        if let Some(dispatch) = self.controller.update(LookupMessage::Submit) {
            self.spawn_fetch(dispatch);
        }
        self.render()
    }

    fn spawn_fetch(&mut self, dispatch: Dispatch) {
        let Dispatch {
            ticket,
            name,
            request,
        } = dispatch;
        debug!(ticket, name = %name, "spawning fetch");
        let transport = Arc::clone(&self.transport);
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::task::spawn_blocking(move || {
            let response = transport.execute(request);
            // The receiver lives as long as the app; a send error means it
            // is shutting down.
            let _ = tx.send(Completion { ticket, response });
        });
    }

    async fn wait_for_completion(&mut self) -> Result<()> {
        match self.completions_rx.recv().await {
            Some(done) => self.complete(done),
            None => anyhow::bail!("completion channel closed"),
        }
    }

    fn complete(&mut self, done: Completion) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.controller.receive(done.ticket, done.response);
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        let panel = Panel::from_state(self.controller.state(), self.style);
        write!(self.out, "{panel}")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
