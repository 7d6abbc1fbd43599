//! Build script for aw9523-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates expander.toml at compile time
//! - Generates the Rust code that builds the expander configuration

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Valid 7-bit addresses (AD0/AD1 strapping)
const ADDRESS_RANGE: std::ops::RangeInclusive<i64> = 0x58..=0x5B;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Expander settings after validation
struct ExpanderToml {
    address: u8,
    port0_drive: &'static str,
    led_current: &'static str,
    pins: Vec<PinToml>,
}

struct PinToml {
    index: u8,
    mode: &'static str,
    initial_high: bool,
    interrupt: bool,
}

/// Validate expander.toml configuration at compile time
fn validate_config() -> ExpanderToml {
    println!("cargo:rerun-if-changed=expander.toml");

    let config_path = Path::new("expander.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: expander.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires an expander.toml configuration file.      ║\n\
            ║  Please create one in the aw9523-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read expander.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in expander.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let expander = validate_expander(&config, &mut errors);
    let pins = validate_pins(&config, &mut errors);
    report("Invalid expander configuration", &errors);

    println!("cargo:warning=expander.toml validated successfully");

    ExpanderToml {
        address: expander.0,
        port0_drive: expander.1,
        led_current: expander.2,
        pins,
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build listing every error
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
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

/// Map a string option onto one of the allowed values
fn choice(
    table: &toml::value::Table,
    key: &str,
    allowed: &[&'static str],
    default: &'static str,
    errors: &mut Vec<String>,
) -> &'static str {
    match table.get(key) {
        None => default,
        Some(toml::Value::String(s)) => match allowed.iter().find(|a| **a == s.as_str()) {
            Some(found) => *found,
            None => {
                errors.push(format!("'{}' must be one of {}", key, allowed.join(", ")));
                default
            }
        },
        Some(_) => {
            errors.push(format!("'{}' must be a string", key));
            default
        }
    }
}

/// Validate the [expander] section
fn validate_expander(
    config: &toml::Value,
    errors: &mut Vec<String>,
) -> (u8, &'static str, &'static str) {
    let expander = match config.get("expander") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[expander] must be a table".to_string());
            return (0x58, "push_pull", "max");
        }
        None => {
            errors.push("Missing [expander] section".to_string());
            return (0x58, "push_pull", "max");
        }
    };

    let address = match expander.get("address") {
        None => 0x58,
        Some(toml::Value::Integer(a)) if ADDRESS_RANGE.contains(a) => *a as u8,
        Some(_) => {
            errors.push("[expander] address must be 0x58-0x5B".to_string());
            0x58
        }
    };

    let drive = choice(
        expander,
        "port0_drive",
        &["push_pull", "open_drain"],
        "push_pull",
        errors,
    );
    let current = choice(
        expander,
        "led_current",
        &["max", "three_quarters", "half", "quarter"],
        "max",
        errors,
    );

    (address, drive, current)
}

/// Validate the [[pin]] entries
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) -> Vec<PinToml> {
    let entries = match config.get("pin") {
        None => return Vec::new(),
        Some(toml::Value::Array(a)) => a,
        Some(_) => {
            errors.push("[[pin]] must be an array of tables".to_string());
            return Vec::new();
        }
    };

    let mut pins: Vec<PinToml> = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let entry = match entry.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("pin entry {} must be a table", i));
                continue;
            }
        };

        let index = match entry.get("index") {
            Some(toml::Value::Integer(n)) if (0..16).contains(n) => *n as u8,
            Some(_) => {
                errors.push(format!("pin entry {} index must be 0-15", i));
                continue;
            }
            None => {
                errors.push(format!("pin entry {} missing 'index'", i));
                continue;
            }
        };

        if pins.iter().any(|p| p.index == index) {
            errors.push(format!("pin {} listed twice", index));
            continue;
        }

        let mode = match entry.get("mode") {
            Some(_) => choice(entry, "mode", &["input", "output", "led"], "input", errors),
            None => {
                errors.push(format!("pin {} missing 'mode'", index));
                continue;
            }
        };

        let initial_high = flag(entry, "initial_high", index, errors);
        let interrupt = flag(entry, "interrupt", index, errors);

        if interrupt && mode != "input" {
            errors.push(format!("pin {} interrupt requires mode = \"input\"", index));
        }
        if initial_high && mode != "output" {
            errors.push(format!("pin {} initial_high requires mode = \"output\"", index));
        }

        pins.push(PinToml {
            index,
            mode,
            initial_high,
            interrupt,
        });
    }

    pins
}

fn flag(table: &toml::value::Table, key: &str, index: u8, errors: &mut Vec<String>) -> bool {
    match table.get(key) {
        None => false,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push(format!("pin {} '{}' must be true or false", index, key));
            false
        }
    }
}

/// Write `expander_config.rs` into OUT_DIR
fn generate_config(config: &ExpanderToml) {
    let drive = match config.port0_drive {
        "open_drain" => "OpenDrain",
        _ => "PushPull",
    };
    let current = match config.led_current {
        "three_quarters" => "ThreeQuarters",
        "half" => "Half",
        "quarter" => "Quarter",
        _ => "Max",
    };

    let mut code = String::new();
    code.push_str("// Generated from expander.toml by build.rs\n\n");
    code.push_str("/// Expander configuration compiled into the firmware\n");
    code.push_str("pub fn expander_config() -> Result<Aw9523Config, ConfigError> {\n");
    code.push_str(&format!(
        "    let mut config = Aw9523Config::new({:#04x});\n",
        config.address
    ));
    code.push_str(&format!("    config.port0_drive = DriveMode::{};\n", drive));
    code.push_str(&format!("    config.led_current = LedCurrent::{};\n", current));

    for pin in &config.pins {
        let entry = match pin.mode {
            "output" => format!("PinConfig::output(Pin::new({})?, {})", pin.index, pin.initial_high),
            "led" => format!("PinConfig::led(Pin::new({})?)", pin.index),
            _ if pin.interrupt => {
                format!("PinConfig::input(Pin::new({})?).with_interrupt()", pin.index)
            }
            _ => format!("PinConfig::input(Pin::new({})?)", pin.index),
        };
        code.push_str(&format!("    config.add_pin({})?;\n", entry));
    }

    code.push_str("    config.validate()?;\n");
    code.push_str("    Ok(config)\n");
    code.push_str("}\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("expander_config.rs"), code).unwrap();
}
