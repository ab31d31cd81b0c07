use crate::error::Result;

/// Run `on_exit` once when the process is asked to stop (Ctrl+C, SIGTERM, SIGHUP).
///
/// The chat loop blocks on stdin, so the handler finishes the session itself
/// instead of raising a flag for the loop to poll.
pub fn setup_exit_handler<F>(on_exit: F) -> Result<()>
where
    F: Fn() + Send + 'static,
{
    #[cfg(unix)]
    {
        use signal_hook::{
            consts::{SIGHUP, SIGINT, SIGTERM},
            iterator::Signals,
        };
        use std::thread::Builder;

        let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP]).map_err(|e| {
            crate::error::ReportError::SignalHandling {
                source: Box::new(e),
            }
        })?;

        Builder::new()
            .name("signal-listener".into())
            .spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    log::info!("Received signal: {sig}");
                    on_exit();
                }
            })?;
    }

    #[cfg(windows)]
    {
        ctrlc::set_handler(on_exit)?;
    }

    Ok(())
}
