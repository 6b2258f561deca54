//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if config.labels.is_none() {
        print_first_time_help();
    } else {
        print_configured_help();
    }
}

/// Print setup guide for first-time users.
pub fn print_first_time_help() {
    println!("No labels file configured. Get started with chillbot:");
    println!();
    println!("1. Initialize configuration:");
    println!("   chillbot config init");
    println!();
    println!("2. Point it at the labels file your model was trained with");
    println!("   (one label per line, in model output order), either with");
    println!("   `labels = \"/path/to/labels.txt\"` in the config file or with --labels.");
    println!();
    println!("3. Record raw model scores, one frame per line, and classify them:");
    println!("   chillbot --labels labels.txt frames.csv");
    println!();
    println!("4. Keep the latest result and ask about it:");
    println!("   chillbot --store fridge.json frames.csv");
    println!("   chillbot --store fridge.json query \"Coca Cola\"");
    println!();
    println!("Run 'chillbot -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: chillbot [OPTIONS] <FRAMES>...");
    println!();
    println!("  chillbot frames.csv                  Classify recorded frames");
    println!("  chillbot --format json frames.csv    One JSON object per frame");
    println!("  chillbot query perrier               Ask the result store");
    println!("  chillbot config show                 Show effective configuration");
    println!();
    println!("Run 'chillbot -h' for all options.");
}
