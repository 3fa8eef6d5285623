//! Text rendition of the demo application.
//!
//! Two flows: `auth` (login, signup) and `main` (home, profile). Logging in
//! replaces the auth flow with the main flow; logging out does the reverse.
//! Screens only see a [`NavigationPort`], never the navigator.

use navgraph_core::{
    BackStackEntry, NavConfig, NavError, NavOptions, NavigationPort, Navigator, RouteParams,
};
use std::io::{BufRead, Write};

use crate::commands::{CliError, Result};

/// Navigation config of the demo application.
pub const DEMO_CONFIG: &str = r#"
root: root
destinations:
  - id: login
    route: login
  - id: signup
    route: signup
  - id: home
    route: home
  - id: profile
    route: profile/{name}/{score}
graphs:
  - id: auth
    start: login
    members: [login, signup]
  - id: main
    start: home
    members: [home, profile]
  - id: root
    start: auth
    members: [auth, main]
"#;

/// Score shown on every profile.
const DEFAULT_SCORE: &str = "95";

/// State bound to text fields.
#[derive(Debug, Default)]
pub struct Form {
    pub name: String,
}

/// Outcome of pressing a button.
#[derive(Debug, PartialEq, Eq)]
pub enum Pressed {
    /// Navigation was requested (or the button needed nothing else).
    Done,
    /// The next input line is the text field value.
    EditText,
    /// No button with that number.
    Unknown,
}

/// A screen of the demo application.
pub trait Screen {
    /// Lines to display, including numbered buttons.
    fn render(&self, entry: &BackStackEntry, form: &Form) -> Vec<String>;

    /// Handles button `button` (1-based).
    fn press(
        &self,
        button: usize,
        form: &Form,
        port: &mut dyn NavigationPort,
    ) -> std::result::Result<Pressed, NavError>;
}

fn log_in(port: &mut dyn NavigationPort) -> std::result::Result<Pressed, NavError> {
    port.navigate(
        "main",
        RouteParams::new(),
        NavOptions::new().pop_up_to_inclusive("auth"),
    )?;
    Ok(Pressed::Done)
}

struct LoginScreen;

impl Screen for LoginScreen {
    fn render(&self, _entry: &BackStackEntry, _form: &Form) -> Vec<String> {
        vec![
            "== Login ==".into(),
            "1) Log in".into(),
            "2) Create an account".into(),
        ]
    }

    fn press(
        &self,
        button: usize,
        _form: &Form,
        port: &mut dyn NavigationPort,
    ) -> std::result::Result<Pressed, NavError> {
        match button {
            1 => log_in(port),
            2 => {
                port.navigate("signup", RouteParams::new(), NavOptions::new().single_top())?;
                Ok(Pressed::Done)
            }
            _ => Ok(Pressed::Unknown),
        }
    }
}

struct SignupScreen;

impl Screen for SignupScreen {
    fn render(&self, _entry: &BackStackEntry, _form: &Form) -> Vec<String> {
        vec![
            "== Sign up ==".into(),
            "1) Sign up".into(),
            "2) Back to login".into(),
        ]
    }

    fn press(
        &self,
        button: usize,
        _form: &Form,
        port: &mut dyn NavigationPort,
    ) -> std::result::Result<Pressed, NavError> {
        match button {
            1 => log_in(port),
            2 => {
                port.go_back();
                Ok(Pressed::Done)
            }
            _ => Ok(Pressed::Unknown),
        }
    }
}

struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, _entry: &BackStackEntry, form: &Form) -> Vec<String> {
        vec![
            "== Home ==".into(),
            format!("Name: [{}]", form.name),
            "1) Edit name".into(),
            "2) View profile".into(),
            "3) Log out".into(),
        ]
    }

    fn press(
        &self,
        button: usize,
        form: &Form,
        port: &mut dyn NavigationPort,
    ) -> std::result::Result<Pressed, NavError> {
        match button {
            1 => Ok(Pressed::EditText),
            2 => {
                let params = RouteParams::new()
                    .with("name", form.name.clone())
                    .with("score", DEFAULT_SCORE);
                port.navigate("profile", params, NavOptions::new().single_top())?;
                Ok(Pressed::Done)
            }
            3 => {
                port.navigate(
                    "auth",
                    RouteParams::new(),
                    NavOptions::new().pop_up_to_inclusive("main"),
                )?;
                Ok(Pressed::Done)
            }
            _ => Ok(Pressed::Unknown),
        }
    }
}

struct ProfileScreen;

impl Screen for ProfileScreen {
    fn render(&self, entry: &BackStackEntry, _form: &Form) -> Vec<String> {
        vec![
            "== Profile ==".into(),
            format!("Name: {}", entry.params.get("name").unwrap_or_default()),
            format!("Score: {}", entry.params.get("score").unwrap_or_default()),
            "1) Back".into(),
        ]
    }

    fn press(
        &self,
        button: usize,
        _form: &Form,
        port: &mut dyn NavigationPort,
    ) -> std::result::Result<Pressed, NavError> {
        match button {
            1 => {
                port.go_back();
                Ok(Pressed::Done)
            }
            _ => Ok(Pressed::Unknown),
        }
    }
}

/// Returns the screen rendering `destination`.
pub fn screen_for(destination: &str) -> Option<&'static dyn Screen> {
    match destination {
        "login" => Some(&LoginScreen),
        "signup" => Some(&SignupScreen),
        "home" => Some(&HomeScreen),
        "profile" => Some(&ProfileScreen),
        _ => None,
    }
}

/// Builds the demo navigator.
pub fn navigator() -> Result<Navigator> {
    Ok(NavConfig::from_yaml(DEMO_CONFIG)?.to_navigator()?)
}

/// Runs the demo until `q`, end of input, or back at the root screen.
///
/// Input: a button number, `b` for system back, `q` to quit.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let mut nav = navigator()?;
    let mut form = Form::default();
    let mut line = String::new();

    loop {
        let entry = nav.current().clone();
        let screen = screen_for(&entry.destination).ok_or_else(|| CliError::NoScreen {
            destination: entry.destination.clone(),
        })?;

        writeln!(output)?;
        for text in screen.render(&entry, &form) {
            writeln!(output, "{text}")?;
        }
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "q" => break,
            "b" => {
                if !nav.go_back() {
                    writeln!(output, "Leaving the app.")?;
                    break;
                }
            }
            choice => {
                let Ok(button) = choice.parse::<usize>() else {
                    writeln!(output, "Enter a button number, b or q.")?;
                    continue;
                };
                match screen.press(button, &form, &mut nav)? {
                    Pressed::Done => {}
                    Pressed::Unknown => writeln!(output, "No button {button}.")?,
                    Pressed::EditText => {
                        write!(output, "name> ")?;
                        output.flush()?;
                        line.clear();
                        input.read_line(&mut line)?;
                        form.name = line.trim().to_string();
                    }
                }
            }
        }
    }

    tracing::debug!(depth = nav.depth(), "demo finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(input: &str) -> String {
        let mut output = Vec::new();
        run(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_every_destination_has_a_screen() {
        let nav = navigator().unwrap();
        for template in nav.registry().templates() {
            assert!(screen_for(&template.id).is_some(), "{}", template.id);
        }
    }

    #[test]
    fn test_back_at_login_leaves_app() {
        let out = run_with("b\n");
        assert!(out.contains("== Login =="));
        assert!(out.ends_with("Leaving the app.\n"));
    }

    #[test]
    fn test_profile_receives_typed_name() {
        let out = run_with("1\n1\nJohn Doe\n2\n");
        assert!(out.contains("Name: [John Doe]"));
        assert!(out.contains("Name: John Doe\nScore: 95"));
    }

    #[test]
    fn test_login_cannot_go_back_to_auth() {
        // Log in, then system back exits instead of returning to login.
        let out = run_with("1\nb\n");
        assert!(out.contains("== Home =="));
        assert!(out.ends_with("Leaving the app.\n"));
    }

    #[test]
    fn test_logout_returns_to_login() {
        // signup, sign up, view profile, back, log out
        let out = run_with("2\n1\n2\n1\n3\nq\n");
        assert_eq!(out.matches("== Login ==").count(), 2);
        assert_eq!(out.matches("== Home ==").count(), 2);
        assert!(out.rfind("== Login ==") > out.rfind("== Home =="));
    }

    #[test]
    fn test_unknown_input() {
        let out = run_with("9\nx\nq\n");
        assert!(out.contains("No button 9."));
        assert!(out.contains("Enter a button number, b or q."));
    }

    struct StubPort(Vec<String>);

    impl NavigationPort for StubPort {
        fn navigate(
            &mut self,
            target: &str,
            params: RouteParams,
            _options: NavOptions,
        ) -> navgraph_core::Result<()> {
            self.0.push(format!("{target} {params}"));
            Ok(())
        }

        fn navigate_to_route(
            &mut self,
            route: &str,
            _options: NavOptions,
        ) -> navgraph_core::Result<()> {
            self.0.push(route.to_string());
            Ok(())
        }

        fn go_back(&mut self) -> bool {
            self.0.push("back".into());
            true
        }
    }

    #[test]
    fn test_home_buttons_against_stub() {
        let mut port = StubPort(Vec::new());
        let form = Form {
            name: "Ann".into(),
        };
        let home = screen_for("home").unwrap();

        assert_eq!(home.press(1, &form, &mut port).unwrap(), Pressed::EditText);
        assert_eq!(home.press(2, &form, &mut port).unwrap(), Pressed::Done);
        assert_eq!(home.press(3, &form, &mut port).unwrap(), Pressed::Done);
        assert_eq!(home.press(4, &form, &mut port).unwrap(), Pressed::Unknown);
        assert_eq!(
            port.0,
            vec![r#"profile {name: "Ann", score: "95"}"#.to_string(), "auth {}".to_string()]
        );
    }
}
