//! Crossfade Navigation
//!
//! This example walks a small onboarding flow through a headless host.
//!
//! Key concepts:
//! - States bound to screen types
//! - Guards restricting which state may follow
//! - Crossfade by default, instant swaps per state
//! - Timing loaded from JSON configuration
//!
//! Run with: RUST_LOG=segue=debug cargo run --example crossfade_navigation

use segue::core::{Rect, Screen, Surface};
use segue::{
    state_enum, CoordinatorBuilder, EnterOutcome, Guard, MemoryHost, TransitionConfig,
    TransitionState,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Onboarding {
        Splash,
        Welcome,
        SignIn,
        Home,
    }
}

macro_rules! demo_screen {
    ($name:ident) => {
        #[derive(Default)]
        struct $name {
            surface: Surface,
        }

        impl Screen for $name {
            fn surface(&self) -> &Surface {
                &self.surface
            }

            fn surface_mut(&mut self) -> &mut Surface {
                &mut self.surface
            }

            fn did_mount(&mut self) {
                println!("  {} is on screen", stringify!($name));
            }
        }
    };
}

demo_screen!(SplashScreen);
demo_screen!(WelcomeScreen);
demo_screen!(SignInScreen);
demo_screen!(HomeScreen);

fn describe(outcome: &EnterOutcome<Onboarding>) {
    match outcome {
        EnterOutcome::Initial { state } => println!("Started in {state:?}"),
        EnterOutcome::Presented {
            from, to, animated, ..
        } => println!(
            "{from:?} -> {to:?} ({})",
            if *animated { "crossfade" } else { "instant" }
        ),
        EnterOutcome::Refused { current, requested } => {
            println!("{current:?} refused {requested:?}")
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    println!("=== Crossfade Navigation ===\n");

    let config = TransitionConfig::from_json(
        r#"{ "duration_secs": 0.25, "options": { "curve": "ease_out" } }"#,
    )
    .unwrap();

    let host = Rc::new(RefCell::new(MemoryHost::new(Rect::new(
        0.0, 0.0, 390.0, 844.0,
    ))));

    let mut machine = CoordinatorBuilder::new()
        .host(&host)
        .config(config)
        .states(vec![
            TransitionState::new::<SplashScreen>(Onboarding::Splash).instant(),
            TransitionState::new::<WelcomeScreen>(Onboarding::Welcome)
                .with_guard(Guard::only(vec![Onboarding::SignIn])),
            TransitionState::new::<SignInScreen>(Onboarding::SignIn)
                .when(|next| *next != Onboarding::Splash),
            TransitionState::new::<HomeScreen>(Onboarding::Home)
                .when(|next| *next == Onboarding::SignIn),
        ])
        .build()
        .unwrap();

    for step in [
        Onboarding::Splash,
        Onboarding::Welcome,
        Onboarding::Home,
        Onboarding::SignIn,
        Onboarding::Home,
    ] {
        let outcome = machine.enter_state(&step).unwrap();
        describe(&outcome);

        let finished = host.borrow_mut().finish_animations();
        if finished > 0 {
            println!("  finished {finished} animation(s)");
        }
    }

    let host = host.borrow();
    println!("\nAnimations requested: {}", host.animation_records().len());
    for record in host.animation_records() {
        println!(
            "  {} -> {} over {:?} ({:?})",
            record.from, record.to, record.duration, record.options.curve
        );
    }
    println!("Mounted screens: {:?}", host.mounted_kinds());
    println!(
        "Current: {:?}, previous: {:?}",
        machine.current_state(),
        machine.previous_state()
    );
}
