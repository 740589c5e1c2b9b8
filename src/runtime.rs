use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::io::{self, BufRead};
use std::net::ToSocketAddrs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    Stop,
}

/// Background name-resolution probe.
///
/// Owns the shared reachability flag as its single writer; everything else
/// reads it through [`ResolverHandle::reachable`]. The flag starts out
/// `false` — the network is treated as unreachable until the first
/// resolution completes.
pub struct ResolverHandle {
    reachable: Arc<AtomicBool>,
    pub sender: Sender<ControlMessage>,
    pub join: Option<JoinHandle<()>>,
}

impl ResolverHandle {
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.reachable)
    }

    pub fn stop(&mut self) {
        let _ = self.sender.send(ControlMessage::Stop);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

pub fn spawn_resolver(host: String, interval: Duration) -> ResolverHandle {
    let reachable = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&reachable);
    let (tx, rx) = crossbeam_channel::unbounded();
    let join = thread::spawn(move || run_resolver(host, interval, flag, rx));
    ResolverHandle {
        reachable,
        sender: tx,
        join: Some(join),
    }
}

fn run_resolver(
    host: String,
    interval: Duration,
    flag: Arc<AtomicBool>,
    control_rx: Receiver<ControlMessage>,
) {
    loop {
        match control_rx.recv_timeout(interval) {
            Ok(ControlMessage::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                flag.store(resolve_once(&host), Ordering::Relaxed);
            }
        }
    }
}

/// One resolution attempt. Any failure, including an empty address list,
/// reads as unreachable; the next scheduled attempt retries naturally.
fn resolve_once(host: &str) -> bool {
    match (host, 80u16).to_socket_addrs() {
        Ok(mut addrs) => addrs.next().is_some(),
        Err(_) => false,
    }
}

/// Forwards stdin lines to the UI loop. Exits on EOF, read error, or a
/// dropped receiver; the sender side hanging up is how the UI learns the
/// probe process has ended.
pub fn spawn_stdin_reader(line_tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    })
}
