use colored::*;
use tracing::{error, warn};

use medscan_common::view::{Panel, Screen, ViewState, render};

use crate::terminal::{colors, print, spinner};

/// Draws each view transition. Only the newest panel stays live: a running
/// spinner is cleared before anything else is drawn.
pub struct Presenter {
    quiet: u8,
}

impl Presenter {
    pub fn new(quiet: u8) -> Self {
        Self { quiet }
    }

    pub fn show(&self, state: &ViewState) {
        spinner::stop();
        let screen: Screen = render(state);

        match screen.panel() {
            Panel::Scanner => {
                if self.quiet == 0 {
                    print::status(screen.message());
                    print::status("Press 'q' to stop".color(colors::SEPARATOR).to_string());
                }
            }
            Panel::Loading => spinner::start(screen.message().to_string()),
            Panel::Authentic => self.result(&screen, "authentic", colors::AUTHENTIC),
            Panel::Fake => {
                self.result(&screen, "fake", colors::FAKE);
                warn!("{}", screen.message());
            }
            Panel::Error => {
                print::header("error", self.quiet);
                error!("{}", screen.message());
            }
        }
    }

    fn result(&self, screen: &Screen, title: &str, color: Color) {
        print::header(title, self.quiet);
        print::centerln(&screen.message().color(color).bold().to_string());

        if screen.fields().is_empty() {
            return;
        }

        print::set_key_width(screen.fields().iter().map(|field| field.label));

        for field in screen.fields() {
            print::aligned_line(field.label, field.value.as_str());
        }
        print::separator();
    }
}
