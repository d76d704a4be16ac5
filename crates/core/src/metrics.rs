//! Statistics for a single compress or decompress run.
//!
//! Tracks:
//! - Bytes in and out
//! - Alphabet size and payload bit length
//! - Timing
//!
//! The struct is filled in by the caller at each stage and printed at the
//! end. It is not thread-safe; each run owns its own `Stats`.

use std::time::{Duration, Instant};

use crate::container::Container;

/// Which direction a run went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Compress => "compress",
            Operation::Decompress => "decompress",
        }
    }
}

/// Statistics for one run.
#[derive(Debug, Clone)]
pub struct Stats {
    pub operation: Operation,

    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Bytes read from the input
    pub input_bytes: u64,

    /// Bytes written to the output
    pub output_bytes: u64,

    // === Container ===
    /// Uncompressed size (sum of the frequency table)
    pub raw_bytes: u64,

    /// Serialized container size
    pub container_bytes: u64,

    /// Distinct byte values in the alphabet
    pub distinct_symbols: usize,

    /// Meaningful bits in the payload
    pub payload_bits: u64,

    /// Filler bits in the last payload byte
    pub padding: u8,
}

impl Stats {
    /// Create new stats with start time set to now.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            raw_bytes: 0,
            container_bytes: 0,
            distinct_symbols: 0,
            payload_bits: 0,
            padding: 0,
        }
    }

    /// Record the shape of the container that was produced or consumed.
    pub fn record_container(&mut self, container: &Container) {
        self.raw_bytes = container.freqs.total();
        self.container_bytes = container.serialized_len() as u64;
        self.distinct_symbols = container.freqs.len();
        self.payload_bits = container.payload.bit_len() as u64;
        self.padding = container.payload.padding;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compression ratio (container / raw).
    ///
    /// Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Average code length in bits per input byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.raw_bytes as f64
        }
    }

    /// Throughput over the raw data in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.raw_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== {} summary ===", self.operation.as_str());
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("Input:  {} bytes ({:.2} MiB)", self.input_bytes, mib(self.input_bytes));
        println!("Output: {} bytes ({:.2} MiB)", self.output_bytes, mib(self.output_bytes));
        println!();

        println!("=== Container ===");
        println!("Raw bytes: {}", self.raw_bytes);
        println!("Container bytes: {}", self.container_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Payload bits: {} (padding {})", self.payload_bits, self.padding);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Print a one-line result.
    pub fn print_result(&self) {
        match self.operation {
            Operation::Compress => println!(
                "Compression successful: {} -> {} bytes ({:.1}%)",
                self.input_bytes,
                self.output_bytes,
                self.compression_ratio() * 100.0
            ),
            Operation::Decompress => println!(
                "Decompression successful: {} -> {} bytes",
                self.input_bytes, self.output_bytes
            ),
        }
    }

    /// Export stats as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "operation={}\n\
             duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             raw_bytes={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n\
             distinct_symbols={}\n\
             payload_bits={}\n\
             padding={}\n",
            self.operation.as_str(),
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.raw_bytes,
            self.container_bytes,
            self.compression_ratio(),
            self.distinct_symbols,
            self.payload_bits,
            self.padding,
        )
    }
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn test_stats_creation() {
        let stats = Stats::new(Operation::Compress);
        assert!(stats.end_time.is_none());
        assert!(stats.duration().as_millis() < 100);
    }

    #[test]
    fn test_record_container() {
        let container = encode(b"aaabbc").unwrap();
        let mut stats = Stats::new(Operation::Compress);
        stats.record_container(&container);

        assert_eq!(stats.raw_bytes, 6);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.payload_bits, 9);
        assert_eq!(stats.padding, 7);
        assert_eq!(stats.container_bytes, 8 + 15 + 2);
        assert_eq!(stats.bits_per_symbol(), 1.5);
    }

    #[test]
    fn test_compression_ratio() {
        let mut stats = Stats::new(Operation::Compress);
        assert_eq!(stats.compression_ratio(), 0.0);

        stats.raw_bytes = 1000;
        stats.container_bytes = 750;
        assert_eq!(stats.compression_ratio(), 0.75);
    }

    #[test]
    fn test_throughput() {
        let mut stats = Stats::new(Operation::Decompress);
        stats.raw_bytes = 1_000_000;

        std::thread::sleep(Duration::from_millis(10));
        stats.complete();

        assert!(stats.throughput_bps() > 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut stats = Stats::new(Operation::Compress);
        stats.input_bytes = 1000;
        stats.output_bytes = 400;
        stats.distinct_symbols = 10;

        let text = stats.export_text();
        assert!(text.contains("operation=compress"));
        assert!(text.contains("input_bytes=1000"));
        assert!(text.contains("output_bytes=400"));
        assert!(text.contains("distinct_symbols=10"));
    }
}
