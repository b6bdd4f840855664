//! Build script for cadence-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sampler.toml and generates the channel table from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Register windows carry at most this many channels
const MAX_CHANNELS: usize = 16;

/// Smallest prescaler that leaves the FIFO handler time to re-arm AINSEL
/// before the next paced conversion starts (matches the RP2040 engine)
const MIN_CLOCK_DIVIDER: i64 = 4;

/// Largest prescaler whose pacing still fits the 16-bit DIV register
const MAX_CLOCK_DIVIDER: i64 = 682;

const INPUTS: &[(&str, &str)] = &[
    ("adc0", "AdcInput::Adc0"),
    ("adc1", "AdcInput::Adc1"),
    ("adc2", "AdcInput::Adc2"),
    ("adc3", "AdcInput::Adc3"),
    ("temperature", "AdcInput::Temperature"),
];

const REFERENCES: &[(&str, &str)] = &[
    ("supply", "ReferenceMode::Supply"),
    ("internal", "ReferenceMode::Internal"),
    ("external", "ReferenceMode::External"),
];

fn main() {
    setup_linker();
    let config = load_config();
    let channels = validate_channels(&config);
    let sampler = validate_sampler(&config);
    generate(&channels, &sampler);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Abort the build with a boxed list of errors
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Read and parse sampler.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=sampler.toml");

    let config_path = Path::new("sampler.toml");
    if !config_path.exists() {
        fail(
            "sampler.toml not found",
            &["Create sampler.toml in the cadence-firmware directory".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read sampler.toml", &[e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e
                .to_string()
                .lines()
                .map(|line| {
                    if line.chars().count() > 60 {
                        format!("{}...", line.chars().take(57).collect::<String>())
                    } else {
                        line.to_string()
                    }
                })
                .collect();
            fail("Invalid TOML syntax in sampler.toml", &lines)
        }
    }
}

/// A validated `[[channel]]` entry
struct Channel {
    name: String,
    input: &'static str,
}

/// Validate the `[[channel]]` list
fn validate_channels(config: &toml::Value) -> Vec<Channel> {
    let entries = match config.get("channel") {
        Some(toml::Value::Array(entries)) => entries,
        Some(_) => fail(
            "Invalid channel configuration",
            &["channel must be an array of tables ([[channel]])".to_string()],
        ),
        None => fail(
            "Missing channels in sampler.toml",
            &["At least one [[channel]] entry is required".to_string()],
        ),
    };

    let mut errors = Vec::new();
    let mut channels = Vec::new();

    if entries.is_empty() {
        errors.push("At least one [[channel]] entry is required".to_string());
    }
    if entries.len() > MAX_CHANNELS {
        errors.push(format!("At most {} channels are supported", MAX_CHANNELS));
    }

    for (i, entry) in entries.iter().enumerate() {
        let entry = match entry.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("channel {} must be a table", i));
                continue;
            }
        };

        let name = match entry.get("name") {
            Some(toml::Value::String(name)) => name.clone(),
            _ => {
                errors.push(format!("channel {} missing 'name'", i));
                continue;
            }
        };
        if channels.iter().any(|c: &Channel| c.name == name) {
            errors.push(format!("channel name '{}' used twice", name));
        }

        let input = match entry.get("input") {
            Some(toml::Value::String(input)) => {
                match INPUTS.iter().find(|(key, _)| *key == input.as_str()) {
                    Some((_, path)) => *path,
                    None => {
                        errors.push(format!(
                            "channel '{}' input must be adc0-adc3 or temperature",
                            name
                        ));
                        continue;
                    }
                }
            }
            _ => {
                errors.push(format!("channel '{}' missing 'input'", name));
                continue;
            }
        };

        channels.push(Channel { name, input });
    }

    if !errors.is_empty() {
        fail("Invalid channel configuration", &errors);
    }
    channels
}

/// Validated `[sampler]` section
struct Sampler {
    reference: &'static str,
    clock_divider: i64,
    ready_wait_polls: Option<i64>,
    alpha: Option<f64>,
    monitor_interval_ms: i64,
}

/// Validate the `[sampler]` section, filling in defaults
fn validate_sampler(config: &toml::Value) -> Sampler {
    let empty = toml::map::Map::new();
    let section = match config.get("sampler") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => fail(
            "Invalid sampler configuration",
            &["[sampler] must be a table".to_string()],
        ),
        None => &empty,
    };

    let mut errors = Vec::new();

    let reference = match section.get("reference") {
        None => "ReferenceMode::Supply",
        Some(toml::Value::String(r)) => {
            match REFERENCES.iter().find(|(key, _)| *key == r.as_str()) {
                Some((_, path)) => *path,
                None => {
                    errors.push("reference must be 'supply', 'internal' or 'external'".to_string());
                    ""
                }
            }
        }
        Some(_) => {
            errors.push("reference must be a string".to_string());
            ""
        }
    };

    let clock_divider = match section.get("clock_divider") {
        None => 128,
        Some(toml::Value::Integer(d)) if (MIN_CLOCK_DIVIDER..=MAX_CLOCK_DIVIDER).contains(d) => *d,
        Some(_) => {
            errors.push(format!(
                "clock_divider must be {}-{}",
                MIN_CLOCK_DIVIDER, MAX_CLOCK_DIVIDER
            ));
            0
        }
    };

    let ready_wait_polls = match section.get("ready_wait_polls") {
        None => None,
        Some(toml::Value::Integer(p)) if (1..=u32::MAX as i64).contains(p) => Some(*p),
        Some(_) => {
            errors.push("ready_wait_polls must be a positive 32-bit integer".to_string());
            None
        }
    };

    let smoothing = match section.get("smoothing") {
        None => false,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("smoothing must be true or false".to_string());
            false
        }
    };

    let alpha = match section.get("alpha") {
        None => 0.9,
        Some(toml::Value::Float(a)) if (0.0..1.0).contains(a) => *a,
        Some(_) => {
            errors.push("alpha must be a float in [0.0, 1.0)".to_string());
            0.0
        }
    };

    let monitor_interval_ms = match section.get("monitor_interval_ms") {
        None => 1000,
        Some(toml::Value::Integer(ms)) if *ms > 0 => *ms,
        Some(_) => {
            errors.push("monitor_interval_ms must be positive".to_string());
            0
        }
    };

    if !errors.is_empty() {
        fail("Invalid sampler configuration", &errors);
    }

    Sampler {
        reference,
        clock_divider,
        ready_wait_polls,
        alpha: smoothing.then_some(alpha),
        monitor_interval_ms,
    }
}

/// Write the generated constants to `$OUT_DIR/sampler_config.rs`
fn generate(channels: &[Channel], sampler: &Sampler) {
    let names = channels
        .iter()
        .map(|c| format!("{:?}", c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let inputs = channels
        .iter()
        .map(|c| c.input)
        .collect::<Vec<_>>()
        .join(", ");
    let ready_wait = match sampler.ready_wait_polls {
        Some(polls) => format!("ReadyWait::Bounded {{ max_polls: {} }}", polls),
        None => "ReadyWait::Forever".to_string(),
    };
    let smoothing = match sampler.alpha {
        Some(alpha) => format!("Smoothing::Exponential {{ alpha: {:?} }}", alpha),
        None => "Smoothing::Disabled".to_string(),
    };

    let code = format!(
        "// Generated by build.rs from sampler.toml\n\
        \n\
        /// Number of sampled channels\n\
        pub const CHANNEL_COUNT: usize = {count};\n\
        \n\
        /// Channel names, by logical index\n\
        pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = [{names}];\n\
        \n\
        /// ADC inputs, by logical index\n\
        pub const CHANNEL_INPUTS: [AdcInput; CHANNEL_COUNT] = [{inputs}];\n\
        \n\
        /// Round-robin channel table\n\
        pub const CHANNEL_TABLE: ChannelTable<AdcInput, CHANNEL_COUNT> =\n    ChannelTable::new(CHANNEL_INPUTS);\n\
        \n\
        /// Sampler configuration\n\
        pub const SAMPLER_CONFIG: SamplerConfig = SamplerConfig {{\n    \
            engine: EngineConfig {{\n        \
                reference: {reference},\n        \
                clock_divider: {divider},\n        \
                ready_wait: {ready_wait},\n    \
            }},\n    \
            smoothing: {smoothing},\n\
        }};\n\
        \n\
        /// Monitor report interval\n\
        pub const MONITOR_INTERVAL_MS: u64 = {interval};\n",
        count = channels.len(),
        names = names,
        inputs = inputs,
        reference = sampler.reference,
        divider = sampler.clock_divider,
        ready_wait = ready_wait,
        smoothing = smoothing,
        interval = sampler.monitor_interval_ms,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("sampler_config.rs"), code).unwrap();

    println!(
        "cargo:warning=sampler.toml validated successfully ({} channels)",
        channels.len()
    );
}
