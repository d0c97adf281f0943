//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all
//! addon-navigator output, ensuring consistent colors, spacing, and message
//! structure across commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for
//!   branch names and section labels
//! - **Standardized spacing**: Newline before and after all command outputs
//! - **User-friendly formatting**: Clear visual hierarchy and readable output

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
///
/// # Colors
/// - "✕ Error:" in red
/// - Message in white
/// - Newlines before and after for spacing
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
///
/// # Colors
/// - Checkmark in green, message in white
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Formats and prints a `key: value` detail line, indented under a header
pub fn print_detail(label: &str, value: &str) {
    println!("  {} {}", format!("{}:", label).bright_black(), value.white());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_does_not_panic() {
        print_error("Test error message");
    }

    #[test]
    fn test_print_success_does_not_panic() {
        print_success("Operation completed");
    }

    #[test]
    fn test_print_info_does_not_panic() {
        print_info("Information message");
    }

    #[test]
    fn test_print_section_header_does_not_panic() {
        print_section_header("Remote Branches");
    }

    #[test]
    fn test_print_detail_does_not_panic() {
        print_detail("Branch", "blender_5");
    }

    #[test]
    fn test_color_functions_available() {
        // Test that color functions are available and don't panic
        let _ = "test".red();
        let _ = "test".white();
        let _ = "test".blue();
        let _ = "test".bright_black();
    }
}
