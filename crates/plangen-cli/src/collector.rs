//! Interactive collection of a generation request
//!
//! Questions go through the [`Prompter`] trait so the flow can be driven by a
//! scripted reader in tests. Every prompt returns `Ok(None)` when input ends
//! (Ctrl-D), which cancels the whole flow without an error.

use colored::Colorize;
use plangen_core::{
    Catalog, Category, ContentSize, ContentType, Difficulty, GenerationMode, GenerationRequest,
    PlanTitleEntry,
};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::error::Result;

/// Source of operator answers
pub trait Prompter {
    /// Free text; an empty answer yields `default`
    fn text(&mut self, question: &str, default: &str) -> Result<Option<String>>;

    /// Index into `options`
    fn select(&mut self, question: &str, options: &[String]) -> Result<Option<usize>>;

    /// Yes/no; an empty answer yields `default`
    fn confirm(&mut self, question: &str, default: bool) -> Result<Option<bool>>;

    /// Informational line with no answer
    fn notice(&mut self, message: &str) -> Result<()>;

    /// Text that must be non-empty after trimming; re-asks with `error`
    fn required_text(&mut self, question: &str, error: &str) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.text(question, "")? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(Some(answer.to_string()));
            }
            self.notice(error)?;
        }
    }
}

/// Line-oriented prompter over any reader/writer pair
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    use_color: bool,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W, use_color: bool) -> Self {
        Self {
            reader,
            writer,
            use_color,
        }
    }

    /// Consume the prompter, returning the writer
    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.use_color {
            write!(self.writer, "{} {}", "?".green().bold(), prompt.bold())?;
        } else {
            write!(self.writer, "? {}", prompt)?;
        }
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn complain(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            writeln!(self.writer, "  {}", message.red())?;
        } else {
            writeln!(self.writer, "  {}", message)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn text(&mut self, question: &str, default: &str) -> Result<Option<String>> {
        let prompt = if default.is_empty() {
            format!("{} ", question)
        } else {
            format!("{} [{}] ", question, default)
        };
        Ok(self.ask(&prompt)?.map(|answer| {
            if answer.trim().is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    fn select(&mut self, question: &str, options: &[String]) -> Result<Option<usize>> {
        if self.use_color {
            writeln!(self.writer, "{} {}", "?".green().bold(), question.bold())?;
        } else {
            writeln!(self.writer, "? {}", question)?;
        }
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "  {:>2}) {}", i + 1, option)?;
        }

        loop {
            let Some(answer) = self.ask(&format!("Choice [1-{}]: ", options.len()))? else {
                return Ok(None);
            };
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => self.complain(&format!(
                    "Please enter a number between 1 and {}",
                    options.len()
                ))?,
            }
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<Option<bool>> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let Some(answer) = self.ask(&format!("{} {} ", question, hint))? else {
                return Ok(None);
            };
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.complain("Please answer y or n")?,
            }
        }
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            writeln!(self.writer, "{}", message.yellow())?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }
}

/// Plan titles offered before manual entry
#[derive(Debug, Clone, Copy)]
pub enum PlanTitles<'a> {
    /// Plan-file selection is switched off
    Disabled,
    /// Entries found under the plans directory, possibly none
    Offered(&'a [PlanTitleEntry]),
}

const SELECT_FROM_PLANS: &str = "Select from plan files";
const ENTER_MANUALLY: &str = "Enter manually";

/// Walk the operator through the questionnaire for `mode`
///
/// Returns `Ok(None)` when the operator cancels at any question.
pub fn collect<P: Prompter>(
    prompter: &mut P,
    catalog: &Catalog,
    mode: GenerationMode,
    plans: PlanTitles<'_>,
) -> Result<Option<GenerationRequest>> {
    prompter.notice("\n📚 Learning Plan Content Generator")?;
    prompter.notice(&"=".repeat(40))?;

    let Some(preset) = choose_plan_title(prompter, plans)? else {
        return Ok(None);
    };

    let mut builder = GenerationRequest::builder(mode);

    let (title, domain, difficulty) = match preset {
        Some(entry) => {
            debug!(title = %entry.title, "Using plan title");
            (entry.title.clone(), entry.domain_key.clone(), Some(entry.difficulty))
        }
        None => {
            let Some(title) = prompter.required_text("📘 Enter content title:", "Title is required")?
            else {
                return Ok(None);
            };
            let Some(domain) = select_domain(prompter, catalog, mode)? else {
                return Ok(None);
            };
            (title, domain, None)
        }
    };
    builder = builder.title(title).domain(domain);

    match mode {
        GenerationMode::Full => {
            let difficulty = match difficulty {
                Some(d) => d,
                None => {
                    let Some(d) = select_from(prompter, "📊 Select difficulty level:", &Difficulty::ALL)?
                    else {
                        return Ok(None);
                    };
                    d
                }
            };

            let mut categories: Vec<String> =
                Category::ALL.iter().map(ToString::to_string).collect();
            categories.push("None".to_string());
            let Some(index) = prompter.select("📂 Select category:", &categories)? else {
                return Ok(None);
            };
            let category = Category::ALL.get(index).copied();

            let Some(content_type) = select_from(prompter, "📝 Select content type:", &ContentType::ALL)?
            else {
                return Ok(None);
            };
            let Some(custom) =
                prompter.text("✏️ Custom prompt (optional, press Enter to skip):", "")?
            else {
                return Ok(None);
            };
            let Some(include_code) = prompter.confirm("💻 Include code examples?", true)? else {
                return Ok(None);
            };

            builder = builder
                .difficulty(difficulty)
                .category(category)
                .content_type(content_type)
                .custom_instructions(custom)
                .include_code(include_code);
        }
        GenerationMode::Simple => {
            let Some(size) = select_from(prompter, "📏 Select Content Size:", &ContentSize::ALL)?
            else {
                return Ok(None);
            };
            let difficulty = match difficulty {
                Some(d) => d,
                None => {
                    let Some(d) = select_from(
                        prompter,
                        "🎯 Select Difficulty Level:",
                        &Difficulty::SIMPLE_ORDER,
                    )?
                    else {
                        return Ok(None);
                    };
                    d
                }
            };
            builder = builder.size(size).difficulty(difficulty);
        }
    }

    Ok(Some(builder.build(catalog)?))
}

/// `Ok(None)` on cancel, `Ok(Some(None))` for manual entry
fn choose_plan_title<'a, P: Prompter>(
    prompter: &mut P,
    plans: PlanTitles<'a>,
) -> Result<Option<Option<&'a PlanTitleEntry>>> {
    let entries = match plans {
        PlanTitles::Disabled => return Ok(Some(None)),
        PlanTitles::Offered([]) => {
            prompter.notice("No plan titles found, enter the title manually.")?;
            return Ok(Some(None));
        }
        PlanTitles::Offered(entries) => entries,
    };

    let source = [SELECT_FROM_PLANS.to_string(), ENTER_MANUALLY.to_string()];
    let Some(choice) = prompter.select("📋 How would you like to choose the title?", &source)?
    else {
        return Ok(None);
    };
    if choice == 1 {
        return Ok(Some(None));
    }

    let labels: Vec<String> = entries.iter().map(PlanTitleEntry::menu_label).collect();
    let Some(index) = prompter.select("📘 Select a title:", &labels)? else {
        return Ok(None);
    };
    Ok(Some(entries.get(index)))
}

fn select_domain<P: Prompter>(
    prompter: &mut P,
    catalog: &Catalog,
    mode: GenerationMode,
) -> Result<Option<String>> {
    let (question, labels): (&str, Vec<String>) = match mode {
        GenerationMode::Full => (
            "🎯 Select domain:",
            catalog.domains().iter().map(|d| d.label.clone()).collect(),
        ),
        GenerationMode::Simple => (
            "📂 Select Domain:",
            catalog.domains().iter().map(|d| d.short_label.clone()).collect(),
        ),
    };
    Ok(prompter
        .select(question, &labels)?
        .and_then(|i| catalog.domains().get(i))
        .map(|d| d.key.clone()))
}

fn select_from<P: Prompter, T: Copy + ToString>(
    prompter: &mut P,
    question: &str,
    values: &[T],
) -> Result<Option<T>> {
    let labels: Vec<String> = values.iter().map(ToString::to_string).collect();
    Ok(prompter
        .select(question, &labels)?
        .and_then(|i| values.get(i).copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plangen_core::RequestDetails;
    use std::io::Cursor;

    fn run(
        script: &str,
        mode: GenerationMode,
        plans: PlanTitles<'_>,
    ) -> (Option<GenerationRequest>, String) {
        let mut prompter = TerminalPrompter::new(Cursor::new(script.to_string()), Vec::new(), false);
        let request = collect(&mut prompter, &Catalog::standard(), mode, plans).unwrap();
        let output = String::from_utf8(prompter.into_writer()).unwrap();
        (request, output)
    }

    fn entry(title: &str, difficulty: Difficulty) -> PlanTitleEntry {
        PlanTitleEntry {
            title: title.to_string(),
            domain_key: "mathematics".to_string(),
            domain_label: "Mathematics".to_string(),
            difficulty,
        }
    }

    #[test]
    fn full_flow_collects_every_answer() {
        // title, domain 1, difficulty 4 (All), category 1, content type 3, custom, code no
        let script = "Recursion\n1\n4\n1\n3\nuse Rust\nn\n";
        let (request, _) = run(script, GenerationMode::Full, PlanTitles::Disabled);
        let request = request.expect("request");

        assert_eq!(request.title(), "Recursion");
        assert_eq!(request.domain().key, Catalog::standard().domains()[0].key);
        assert_eq!(request.difficulty(), Difficulty::All);
        assert_eq!(request.category(), Some(Category::Coding));
        match request.details() {
            RequestDetails::Full {
                content_type,
                custom_instructions,
                include_code,
                ..
            } => {
                assert_eq!(*content_type, ContentType::ALL[2]);
                assert_eq!(custom_instructions.as_deref(), Some("use Rust"));
                assert!(!include_code);
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_to_empty_answers() {
        let script = "Recursion\n1\n1\n7\n1\n\n\n";
        let (request, _) = run(script, GenerationMode::Full, PlanTitles::Disabled);
        let request = request.expect("request");

        assert_eq!(request.category(), None);
        match request.details() {
            RequestDetails::Full {
                custom_instructions,
                include_code,
                ..
            } => {
                assert_eq!(*custom_instructions, None);
                assert!(include_code);
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn blank_title_is_asked_again() {
        let script = "   \n\nRecursion\n1\n1\n7\n1\n\ny\n";
        let (request, output) = run(script, GenerationMode::Full, PlanTitles::Disabled);

        assert_eq!(request.expect("request").title(), "Recursion");
        assert_eq!(output.matches("Title is required").count(), 2);
    }

    #[test]
    fn out_of_range_choice_is_asked_again() {
        let script = "Recursion\n0\nabc\n99\n2\n1\n7\n1\n\n\n";
        let (request, output) = run(script, GenerationMode::Full, PlanTitles::Disabled);

        assert_eq!(
            request.expect("request").domain().key,
            Catalog::standard().domains()[1].key
        );
        assert_eq!(output.matches("Please enter a number between 1 and").count(), 3);
    }

    #[test]
    fn end_of_input_cancels() {
        for script in ["", "Recursion\n", "Recursion\n1\n1\n7\n1\n\n"] {
            let (request, _) = run(script, GenerationMode::Full, PlanTitles::Disabled);
            assert!(request.is_none(), "script {script:?} should cancel");
        }
    }

    #[test]
    fn simple_flow_asks_size_then_difficulty() {
        // title, domain 2, size 4 (In-Depth), difficulty 1 (All in simple order)
        let script = "Big-O\n2\n4\n1\n";
        let (request, output) = run(script, GenerationMode::Simple, PlanTitles::Disabled);
        let request = request.expect("request");

        assert_eq!(request.difficulty(), Difficulty::All);
        assert_eq!(
            request.details(),
            &RequestDetails::Simple {
                size: ContentSize::InDepth
            }
        );
        assert!(output.contains(&Catalog::standard().domains()[0].short_label));
        assert!(output.find("Select Content Size").unwrap() < output.find("Select Difficulty").unwrap());
    }

    #[test]
    fn plan_selection_prefills_title_domain_and_difficulty() {
        let entries = vec![
            entry("Linear Algebra", Difficulty::Basic),
            entry("Topology", Difficulty::Advanced),
        ];
        // select from plans, entry 2, category None, content type 1, no custom, default code
        let script = "1\n2\n7\n1\n\n\n";
        let (request, output) = run(script, GenerationMode::Full, PlanTitles::Offered(&entries));
        let request = request.expect("request");

        assert!(output.contains("[Advanced] Mathematics - Topology"));
        assert!(!output.contains("Enter content title"));
        assert_eq!(request.title(), "Topology");
        assert_eq!(request.domain().key, "mathematics");
        assert_eq!(request.difficulty(), Difficulty::Advanced);
    }

    #[test]
    fn manual_entry_can_be_chosen_over_plans() {
        let entries = vec![entry("Linear Algebra", Difficulty::Basic)];
        let script = "2\nRecursion\n1\n1\n7\n1\n\n\n";
        let (request, _) = run(script, GenerationMode::Full, PlanTitles::Offered(&entries));

        assert_eq!(request.expect("request").title(), "Recursion");
    }

    #[test]
    fn empty_plan_list_falls_back_with_notice() {
        let script = "Recursion\n1\n1\n7\n1\n\n\n";
        let (request, output) = run(script, GenerationMode::Full, PlanTitles::Offered(&[]));

        assert!(request.is_some());
        assert!(output.contains("No plan titles found"));
        assert!(!output.contains(SELECT_FROM_PLANS));
    }

    #[test]
    fn confirm_rejects_unknown_answers() {
        let mut prompter = TerminalPrompter::new(Cursor::new("maybe\nYES\n"), Vec::new(), false);
        assert_eq!(prompter.confirm("Continue?", false).unwrap(), Some(true));
        let output = String::from_utf8(prompter.into_writer()).unwrap();
        assert!(output.contains("(y/N)"));
        assert!(output.contains("Please answer y or n"));
    }
}
