//! Renders poll reports over defmt.

use expander_bus::{
    decode, CycleSummary, ExpanderWidth, PollEvent, PollSink,
};

/// Logs every reading as a hex word, a bit dump and one line per pin.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtSink;

impl PollSink for DefmtSink {
    fn cycle_started(&mut self, expanders: usize) {
        crate::info!("polling {} expanders", expanders);
    }

    fn reading(&mut self, event: &PollEvent) {
        let raw = match event.outcome {
            Ok(raw) => raw,
            Err(e) => {
                crate::warn!(
                    "{=str} @ {=u8:#04x}: read failed: {}",
                    event.label,
                    event.address,
                    e
                );
                return;
            }
        };
        let Some(width) = ExpanderWidth::from_line_count(event.line_count)
        else {
            crate::warn!(
                "{=str}: unsupported line count {}",
                event.label,
                event.line_count
            );
            return;
        };

        let lines = decode(&raw, width);
        match width {
            ExpanderWidth::Width8 => crate::info!(
                "{=str} @ {=u8:#04x}: {=u16:#04x} {=u16:08b}",
                event.label,
                event.address,
                lines.raw(),
                lines.raw()
            ),
            ExpanderWidth::Width16 => crate::info!(
                "{=str} @ {=u8:#04x}: {=u16:#06x} {=u16:016b}",
                event.label,
                event.address,
                lines.raw(),
                lines.raw()
            ),
        }
        for (pin, high) in lines.iter().enumerate() {
            crate::info!(
                "  P{=usize}: {=str}",
                pin,
                if high { "HIGH" } else { "LOW" }
            );
        }
    }

    fn cycle_finished(&mut self, summary: &CycleSummary) {
        if !summary.all_ok() {
            crate::warn!(
                "cycle done: {} ok, {} failed",
                summary.ok,
                summary.failed
            );
        } else {
            crate::info!("cycle done: {} ok", summary.ok);
        }
    }
}
