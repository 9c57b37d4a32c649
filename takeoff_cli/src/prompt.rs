//! Terminal prompts that collect a raw [`ParameterInput`].
//!
//! Each numeric prompt repeats until it gets a finite, non-negative number;
//! choice prompts repeat until they get one of the listed codes. The result
//! still goes through [`ParameterInput::validate`] afterwards.

use std::io::{self, BufRead, Write};

use takeoff_core::validation::{ParameterInput, PartitionInput, WwrInput};

/// Line-oriented prompter over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Write a line of guidance text.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before all parameters were entered",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Free text, trimmed. May be empty.
    pub fn text(&mut self, prompt: &str) -> io::Result<String> {
        self.read_line(prompt)
    }

    /// A finite number ≥ 0.
    pub fn number(&mut self, prompt: &str) -> io::Result<f64> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<f64>() {
                Ok(value) if !value.is_finite() => self.say("Invalid input. Please enter a number.")?,
                Ok(value) if value < 0.0 => {
                    self.say("Input must be a non-negative number. Please try again.")?
                }
                Ok(value) => return Ok(value),
                Err(_) => self.say("Invalid input. Please enter a number.")?,
            }
        }
    }

    /// A whole number ≥ `min`.
    pub fn count(&mut self, prompt: &str, min: u32) -> io::Result<f64> {
        loop {
            let value = self.number(prompt)?;
            if value.fract() == 0.0 && value >= f64::from(min) {
                return Ok(value);
            }
            self.say(&format!("Please enter a whole number of at least {}.", min))?;
        }
    }

    /// One of `options`, compared case-insensitively. Returns the option as listed.
    pub fn choice(&mut self, prompt: &str, options: &[&str]) -> io::Result<String> {
        loop {
            let line = self.read_line(prompt)?.to_uppercase();
            if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(&line)) {
                return Ok(option.to_string());
            }
            let listed: Vec<String> = options.iter().map(|o| format!("'{}'", o)).collect();
            self.say(&format!("Invalid choice. Please enter {}.", join_or(&listed)))?;
        }
    }

    /// Walk through every building parameter in order.
    pub fn collect_parameters(&mut self) -> io::Result<ParameterInput> {
        self.say("--- Building Dimensions ---")?;
        let length = self.number("Enter building length, North/South facades (m): ")?;
        let width = self.number("Enter building width, East/West facades (m): ")?;
        let height_per_story = self.number("Enter average height per story (m): ")?;
        let num_stories = self.count("Enter number of stories (levels): ", 1)?;
        let num_vertical_modules = self.count(
            "Enter number of vertical circulation modules (stairs/elevators) (0, 1, 2...): ",
            0,
        )?;

        self.say("\n--- Structural Inputs ---")?;
        let col_spacing_length = self.number("Enter column spacing along the LENGTH (m): ")?;
        let col_spacing_width = self.number("Enter column spacing along the WIDTH (m): ")?;

        self.say("\n--- Interior Inputs ---")?;
        let partition = self.collect_partition()?;

        self.say("\n--- Facade Inputs (WWR) ---")?;
        let wwr = self.collect_wwr()?;

        Ok(ParameterInput {
            length,
            width,
            height_per_story,
            num_stories,
            num_vertical_modules,
            col_spacing_length,
            col_spacing_width,
            partition,
            wwr,
        })
    }

    fn collect_partition(&mut self) -> io::Result<PartitionInput> {
        self.say("Choose a method to estimate interior partitions:")?;
        self.say(" (F) Factor: Simple density factor (e.g., 0.3 m/m²).")?;
        self.say(" (L) Layout: Bottom-up estimate based on building use and a corridor.")?;
        let mode = self.choice("Choose partition method [F/L]: ", &["F", "L"])?;

        if mode == "F" {
            let factor = self.number(
                "  Enter partition density factor (m/m²) (e.g., 0.1 for office, 0.3 for residential): ",
            )?;
            return Ok(PartitionInput {
                mode,
                density_factor: Some(factor),
                ..PartitionInput::default()
            });
        }

        self.say("\n  --- Layout Method Inputs ---")?;
        let building_use = self.choice(
            "  Enter Building Use (R)esidential, (C)ommercial, (O)ffice: ",
            &["R", "C", "O"],
        )?;
        let corridor_position = self.choice(
            "  Enter Corridor Position (M=Middle, N=North, S=South) [M/N/S]: ",
            &["M", "N", "S"],
        )?;
        let corridor_width = self.number("  Enter average corridor width (m) (e.g., 2): ")?;
        let bathroom_perimeter =
            self.number("  Enter avg. bathroom module perimeter (m) (e.g., 10 for 2.5x2.5m): ")?;

        Ok(PartitionInput {
            mode,
            density_factor: None,
            building_use: Some(building_use),
            corridor_position: Some(corridor_position),
            corridor_width: Some(corridor_width),
            bathroom_perimeter: Some(bathroom_perimeter),
        })
    }

    fn collect_wwr(&mut self) -> io::Result<WwrInput> {
        self.say("For Window-to-Wall Ratio (WWR), you can use a single average")?;
        self.say("or specify a different ratio for each orientation.")?;
        let mode = self.choice("Use (S)imple WWR or by (O)rientation? [S/O]: ", &["S", "O"])?;

        if mode == "S" {
            let general = self.number("Enter general WWR (e.g., 0.4 for 40%): ")?;
            return Ok(WwrInput {
                mode,
                general: Some(general),
                ..WwrInput::default()
            });
        }

        self.say("North/South facades run along the length, East/West along the width.")?;
        Ok(WwrInput {
            mode,
            general: None,
            north: Some(self.number("Enter NORTH WWR (e.g., 0.3): ")?),
            south: Some(self.number("Enter SOUTH WWR (e.g., 0.5): ")?),
            east: Some(self.number("Enter EAST WWR (e.g., 0.4): ")?),
            west: Some(self.number("Enter WEST WWR (e.g., 0.4): ")?),
        })
    }
}

fn join_or(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_core::parameters::{BuildingUse, PartitionMode, WwrMode};

    fn prompter(script: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(script.as_bytes(), Vec::new())
    }

    fn transcript(p: Prompter<&[u8], Vec<u8>>) -> String {
        String::from_utf8(p.output).unwrap()
    }

    #[test]
    fn number_reprompts_on_bad_entries() {
        let mut p = prompter("abc\n-2\ninf\n 4.5 \n");
        assert_eq!(p.number("x: ").unwrap(), 4.5);

        let out = transcript(p);
        assert_eq!(out.matches("x: ").count(), 4);
        assert_eq!(out.matches("Invalid input. Please enter a number.").count(), 2);
        assert!(out.contains("Input must be a non-negative number."));
    }

    #[test]
    fn count_requires_whole_numbers() {
        let mut p = prompter("2.5\n0\n3\n");
        assert_eq!(p.count("n: ", 1).unwrap(), 3.0);
        assert_eq!(transcript(p).matches("whole number of at least 1").count(), 2);
    }

    #[test]
    fn choice_is_case_insensitive() {
        let mut p = prompter("x\nl\n");
        assert_eq!(p.choice("mode: ", &["F", "L"]).unwrap(), "L");
        assert!(transcript(p).contains("Please enter 'F' or 'L'."));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("");
        let err = p.number("x: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn collects_factor_and_simple_inputs() {
        let script = "20\n10\n3\n5\n1\n5\n5\nF\n0.3\nS\n0.4\n";
        let input = prompter(script).collect_parameters().unwrap();
        let params = input.validate().unwrap();

        assert_eq!(params.num_stories, 5);
        assert_eq!(
            params.partition_mode,
            PartitionMode::Factor { partition_density_factor: 0.3 }
        );
        assert_eq!(params.wwr_mode, WwrMode::Simple { wwr_general: 0.4 });
    }

    #[test]
    fn collects_layout_and_orientation_inputs() {
        let script = "40\n20\n3\n3\n2\n8\n5\nL\nr\nm\n2\n10\nO\n0.3\n0.5\n0.4\n0.4\n";
        let params = prompter(script).collect_parameters().unwrap().validate().unwrap();

        let layout = params.partition_mode.layout().unwrap();
        assert_eq!(layout.building_use, BuildingUse::Residential);
        assert_eq!(layout.bathroom_perimeter, 10.0);
        match params.wwr_mode {
            WwrMode::ByOrientation(ratios) => assert_eq!(ratios.south, 0.5),
            other => panic!("unexpected mode: {:?}", other),
        }
    }

    #[test]
    fn prompt_accepts_values_that_validation_rejects() {
        // Zero length passes the prompt but not validation
        let script = "0\n10\n3\n1\n0\n5\n5\nF\n0.3\nS\n0.4\n";
        let input = prompter(script).collect_parameters().unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn join_or_formats_lists() {
        assert_eq!(join_or(&["'R'".into()]), "'R'");
        assert_eq!(join_or(&["'R'".into(), "'C'".into(), "'O'".into()]), "'R', 'C', or 'O'");
    }
}
