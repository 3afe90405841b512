use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ironfit_core::bmi::{categorize_bmi, compute_bmi, BmiCategory};
use ironfit_core::config::IronfitConfig;
use ironfit_core::model::*;
use ironfit_core::repository::ActivePlans;
use ironfit_core::seed::seed_if_empty;
use ironfit_core::session::SessionManager;
use ironfit_core::stats::{home_stats, trainer_dashboard};
use ironfit_core::storage::{open_store, Store};
use ironfit_core::validation::SignupForm;
use ironfit_core::IronfitError;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ironfit", about = "ironfit: gym membership, plans and progress", version)]
enum Cli {
    /// Load the demonstration dataset (only once per store)
    Seed,
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
        /// Register as a trainer instead of a customer
        #[arg(long)]
        trainer: bool,
        /// Trainers only
        #[arg(long, default_value = "")]
        specialization: String,
        /// Trainers only, e.g. "5 years"
        #[arg(long, default_value = "")]
        experience: String,
    },
    /// Sign in as an existing user
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Active diet and workout plans for the signed-in user
    Plans {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Record or list weight progress (customers)
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
    /// Compute BMI from weight (kg) and height (cm)
    Bmi { weight: f64, height: f64 },
    /// Dashboard counters (trainer view when signed in as a trainer)
    Stats {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List customers (trainers)
    Customers {
        /// Case-insensitive match on username or name
        #[arg(short, long)]
        search: Option<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Profile, plans and latest progress of one customer (trainers)
    Customer {
        username: String,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Author or edit a customer's plans (trainers)
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile with BMI
    Show {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields; unspecified fields keep their current value
    Edit {
        #[arg(long)]
        age: Option<u32>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        diseases: Option<String>,
        /// lose_weight, gain_muscle, maintain, endurance, strength
        #[arg(long)]
        goal: Option<Goal>,
        /// sedentary, lightly_active, moderately_active, very_active, extremely_active
        #[arg(long)]
        activity_level: Option<ActivityLevel>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        emergency_contact: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Record a weigh-in
    Add {
        /// Weight in kg
        weight: f64,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Photo file name
        #[arg(long)]
        photo: Option<String>,
    },
    /// Most recent weigh-ins, latest first
    List {
        /// Defaults to progress.recent_limit
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show every record
        #[arg(long)]
        all: bool,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    /// Create a diet plan
    CreateDiet {
        /// Customer username
        customer: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        breakfast: String,
        #[arg(long, default_value = "")]
        lunch: String,
        #[arg(long, default_value = "")]
        dinner: String,
        #[arg(long, default_value = "")]
        snacks: String,
        #[arg(long, default_value = "")]
        water_intake: String,
        #[arg(long, default_value = "")]
        supplements: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long)]
        calories: Option<u32>,
        /// Protein target in grams
        #[arg(long)]
        protein: Option<u32>,
    },
    /// Create a weekly workout plan
    CreateWorkout {
        /// Customer username
        customer: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// One flag per day, Monday first (repeat 7 times at most)
        #[arg(long = "day")]
        days: Vec<String>,
        #[arg(long, default_value = "4")]
        weeks: u32,
    },
    /// Edit one of your diet plans; unspecified fields keep their value
    EditDiet {
        plan_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        breakfast: Option<String>,
        #[arg(long)]
        lunch: Option<String>,
        #[arg(long)]
        dinner: Option<String>,
        #[arg(long)]
        snacks: Option<String>,
        #[arg(long)]
        water_intake: Option<String>,
        #[arg(long)]
        supplements: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        calories: Option<u32>,
        #[arg(long)]
        protein: Option<u32>,
        #[command(flatten)]
        status: PlanStatus,
    },
    /// Edit one of your workout plans; unspecified fields keep their value
    EditWorkout {
        plan_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replaces the whole week, Monday first (repeat 7 times at most)
        #[arg(long = "day")]
        days: Vec<String>,
        #[arg(long)]
        weeks: Option<u32>,
        #[command(flatten)]
        status: PlanStatus,
    },
}

#[derive(clap::Args)]
struct PlanStatus {
    /// Mark the plan active again
    #[arg(long, conflicts_with = "deactivate")]
    activate: bool,
    /// Retire the plan; it stays in the customer's history
    #[arg(long)]
    deactivate: bool,
}

impl PlanStatus {
    fn apply(&self, is_active: &mut bool) {
        if self.activate {
            *is_active = true;
        } else if self.deactivate {
            *is_active = false;
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("IRONFIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    let result = run(cli, &config);
    if let Err(ref err) = result {
        if let Some(IronfitError::Validation(errors)) = err.downcast_ref::<IronfitError>() {
            eprintln!("{}", "Please fix the following:".red());
            for (field, message) in errors.iter() {
                eprintln!("  {} {}", format!("{field}:").yellow(), message);
            }
            std::process::exit(1);
        }
    }
    result
}

/// Layered config from the working directory, with `IRONFIT_DB` overriding
/// the SQLite path.
fn load_config() -> Result<IronfitConfig> {
    let mut config = IronfitConfig::load(Some(&std::env::current_dir()?)).unwrap_or_else(|e| {
        tracing::warn!("falling back to default config: {e}");
        IronfitConfig::default_config()
    });
    if let Ok(path) = std::env::var("IRONFIT_DB") {
        config.storage.path = Some(path);
    }
    Ok(config)
}

fn run(cli: Cli, config: &IronfitConfig) -> Result<()> {
    // No store needed.
    if let Cli::Bmi { weight, height } = cli {
        return cmd_bmi(weight, height);
    }

    let store = make_store(config)?;
    if config.seed.enabled {
        seed_if_empty(&store).context("failed to seed store")?;
    }
    let mut session = SessionManager::open(&store, config).context("failed to restore session")?;

    match cli {
        Cli::Seed => cmd_seed(&store),
        Cli::Signup {
            first_name,
            last_name,
            username,
            email,
            password,
            confirm_password,
            trainer,
            specialization,
            experience,
        } => {
            let form = SignupForm {
                first_name,
                last_name,
                username,
                email,
                password_confirmation: confirm_password.unwrap_or_else(|| password.clone()),
                password,
                user_type: if trainer {
                    UserType::Trainer
                } else {
                    UserType::Customer
                },
                specialization,
                experience,
            };
            let record = session.signup(&form)?;
            println!(
                "{} Welcome, {}! Signed in as {} ({}).",
                "✓".green(),
                record.user.first_name,
                record.user.username.cyan(),
                record.user.user_type()
            );
            Ok(())
        }
        Cli::Login { username, password } => {
            let record = session.login(&Credentials::new(username, password))?;
            println!(
                "{} Signed in as {} ({}).",
                "✓".green(),
                record.user.username.cyan(),
                record.user.user_type()
            );
            Ok(())
        }
        Cli::Logout => {
            session.logout()?;
            println!("Signed out.");
            Ok(())
        }
        Cli::Whoami { json } => cmd_whoami(&session, json),
        Cli::Profile { action } => match action {
            ProfileAction::Show { json } => cmd_profile_show(&session, json),
            ProfileAction::Edit {
                age,
                height,
                weight,
                diseases,
                goal,
                activity_level,
                phone,
                emergency_contact,
            } => {
                let mut input = session.profile().map(ProfileInput::from).unwrap_or_default();
                input.age = age.or(input.age);
                input.height_cm = height.or(input.height_cm);
                input.weight_kg = weight.or(input.weight_kg);
                input.goal = goal.or(input.goal);
                input.activity_level = activity_level.or(input.activity_level);
                if let Some(d) = diseases {
                    input.diseases = d;
                }
                if let Some(p) = phone {
                    input.phone = p;
                }
                if let Some(c) = emergency_contact {
                    input.emergency_contact = c;
                }
                session.update_profile(input)?;
                println!("{} Profile updated.", "✓".green());
                cmd_profile_show(&session, false)
            }
        },
        Cli::Plans { json } => cmd_plans(&session, json),
        Cli::Progress { action } => match action {
            ProgressAction::Add {
                weight,
                date,
                notes,
                photo,
            } => {
                let record = session.record_progress(ProgressInput {
                    weight_kg: weight,
                    date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                    notes,
                    photo,
                })?;
                println!(
                    "{} Recorded {} kg on {}.",
                    "✓".green(),
                    record.weight_kg,
                    record.date
                );
                Ok(())
            }
            ProgressAction::List { limit, all, json } => {
                let limit = if all {
                    usize::MAX
                } else {
                    limit.unwrap_or(config.progress.recent_limit)
                };
                cmd_progress_list(&store, &session, limit, json)
            }
        },
        Cli::Bmi { weight, height } => cmd_bmi(weight, height),
        Cli::Stats { json } => cmd_stats(&store, &session, json),
        Cli::Customers { search, json } => cmd_customers(&store, &session, search, json),
        Cli::Customer { username, json } => cmd_customer_detail(&session, &username, json),
        Cli::Plan { action } => cmd_plan(&store, &session, action),
    }
}

fn make_store(config: &IronfitConfig) -> Result<Store> {
    open_store(config).context("failed to open store")
}

fn require_user(session: &SessionManager<'_>) -> Result<User> {
    session
        .user()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("not logged in, run `ironfit login <username>` first"))
}

// ---------------------------------------------------------------------------
// seed / whoami
// ---------------------------------------------------------------------------

fn cmd_seed(store: &Store) -> Result<()> {
    if seed_if_empty(store)? {
        println!("{} Demo data loaded.", "✓".green());
    } else {
        println!("Demo data already present, nothing to do.");
    }
    println!(
        "  {} john_trainer, sarah_trainer, mike_customer (any password)",
        "Accounts:".dimmed()
    );
    Ok(())
}

fn cmd_whoami(session: &SessionManager<'_>, json: bool) -> Result<()> {
    let Some(record) = session.current() else {
        if json {
            println!("null");
        } else {
            println!("Not logged in.");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    let user = &record.user;
    println!("{}", user.full_name().bold());
    println!("  {}  {}", "Username:".dimmed(), user.username.cyan());
    println!("  {}  {}", "Email:".dimmed(), user.email);
    println!("  {}  {}", "Role:".dimmed(), user.user_type().to_string().magenta());
    match &user.role {
        Role::Trainer {
            specialization,
            experience,
        } => {
            println!("  {}  {}", "Specialization:".dimmed(), specialization);
            println!("  {}  {}", "Experience:".dimmed(), experience);
        }
        Role::Customer => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// profile
// ---------------------------------------------------------------------------

fn cmd_profile_show(session: &SessionManager<'_>, json: bool) -> Result<()> {
    require_user(session)?;
    let Some(profile) = session.profile() else {
        if json {
            println!("null");
        } else {
            println!("No profile yet. Run `ironfit profile edit` to create one.");
        }
        return Ok(());
    };

    if json {
        let value = serde_json::json!({
            "profile": profile,
            "bmi": profile.bmi(),
            "bmiCategory": profile.bmi_category().label(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let show = |label: &str, value: String| {
        println!("  {:<20} {}", format!("{label}:").dimmed(), value);
    };
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    println!("{}", "--- Profile ---".dimmed());
    show("Age", or_dash(profile.age.map(|a| a.to_string())));
    show("Height", or_dash(profile.height_cm.map(|h| format!("{h} cm"))));
    show("Weight", or_dash(profile.weight_kg.map(|w| format!("{w} kg"))));
    show("Goal", or_dash(profile.goal.map(|g| g.label().to_string())));
    show(
        "Activity level",
        or_dash(profile.activity_level.map(|a| a.label().to_string())),
    );
    show("Medical conditions", profile.diseases.clone());
    show("Phone", profile.phone.clone());
    show("Emergency contact", profile.emergency_contact.clone());
    println!();
    print_bmi(profile.bmi(), profile.bmi_category());
    Ok(())
}

// ---------------------------------------------------------------------------
// bmi
// ---------------------------------------------------------------------------

fn cmd_bmi(weight: f64, height: f64) -> Result<()> {
    let bmi = compute_bmi(Some(weight), Some(height));
    print_bmi(bmi, categorize_bmi(bmi));
    Ok(())
}

fn print_bmi(bmi: Option<f64>, category: BmiCategory) {
    let label = match category {
        BmiCategory::Normal => category.label().green().to_string(),
        BmiCategory::Underweight | BmiCategory::Overweight => category.label().yellow().to_string(),
        BmiCategory::Obese => category.label().red().to_string(),
        BmiCategory::Unknown => category.label().dimmed().to_string(),
    };
    match bmi {
        Some(value) => println!("BMI {:.2} ({})", value, label),
        None => println!("BMI unavailable ({})", label),
    }
}

// ---------------------------------------------------------------------------
// plans
// ---------------------------------------------------------------------------

fn cmd_plans(session: &SessionManager<'_>, json: bool) -> Result<()> {
    require_user(session)?;
    let plans = session.active_plans()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    if plans.is_empty() {
        println!("No active plans.");
        return Ok(());
    }
    print_plans(&plans);
    Ok(())
}

fn print_plans(plans: &ActivePlans) {
    for plan in &plans.diet_plans {
        println!(
            "{} {} {} {}",
            "Diet".magenta(),
            plan.title.bold(),
            plan_status(plan.is_active),
            plan.id.dimmed()
        );
        if !plan.description.is_empty() {
            println!("  {}", plan.description);
        }
        for (label, value) in [
            ("Breakfast", &plan.breakfast),
            ("Lunch", &plan.lunch),
            ("Dinner", &plan.dinner),
            ("Snacks", &plan.snacks),
            ("Water", &plan.water_intake),
            ("Supplements", &plan.supplements),
        ] {
            if !value.is_empty() {
                println!("  {:<12} {}", format!("{label}:").dimmed(), value);
            }
        }
        if let Some(kcal) = plan.calories_target {
            println!("  {:<12} {} kcal", "Calories:".dimmed(), kcal);
        }
        if let Some(protein) = plan.protein_target {
            println!("  {:<12} {} g", "Protein:".dimmed(), protein);
        }
        println!();
    }
    for plan in &plans.workout_plans {
        println!(
            "{} {} {} {} {}",
            "Workout".blue(),
            plan.title.bold(),
            format!("({} weeks)", plan.duration_weeks).dimmed(),
            plan_status(plan.is_active),
            plan.id.dimmed()
        );
        for (day, routine) in plan.days() {
            let routine = if routine.is_empty() { "Rest" } else { routine };
            println!("  {:<10} {}", format!("{day}:").dimmed(), routine);
        }
        println!();
    }
}

fn plan_status(is_active: bool) -> String {
    if is_active {
        "active".green().to_string()
    } else {
        "inactive".dimmed().to_string()
    }
}

// ---------------------------------------------------------------------------
// progress
// ---------------------------------------------------------------------------

fn cmd_progress_list(
    store: &Store,
    session: &SessionManager<'_>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let user = require_user(session)?;
    let records = store
        .progress()
        .list_recent(&user.id, limit)
        .context("failed to read progress")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No progress recorded yet.");
        return Ok(());
    }

    println!(
        "  {}  {}  {}",
        format!("{:<10}", "Date").dimmed(),
        format!("{:>7}", "Weight").dimmed(),
        "Notes".dimmed(),
    );
    println!("{}", "─".repeat(60).dimmed());
    for r in &records {
        println!(
            "  {}  {:>7}  {}",
            r.date.to_string().cyan(),
            format!("{:.1}", r.weight_kg),
            r.notes
        );
    }
    println!("{}", "─".repeat(60).dimmed());

    if let Some(trend) = store.progress().weight_trend(&user.id)? {
        let change = format!("{:+.2} kg", trend.change_kg);
        println!(
            "  {} entr{}, latest {:.1} kg, change {}",
            trend.entries,
            if trend.entries == 1 { "y" } else { "ies" },
            trend.latest_kg,
            change.bold()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// stats / customers
// ---------------------------------------------------------------------------

fn cmd_stats(store: &Store, session: &SessionManager<'_>, json: bool) -> Result<()> {
    match session.user().filter(|u| u.is_trainer()) {
        Some(trainer) => {
            let dashboard = trainer_dashboard(store, &trainer.id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
                return Ok(());
            }
            let stats = &dashboard.stats;
            println!("{}", "--- Trainer dashboard ---".dimmed());
            println!("  {:<22} {}", "Customers:", stats.total_customers.to_string().cyan());
            println!("  {:<22} {}", "Active diet plans:", stats.active_diet_plans.to_string().cyan());
            println!(
                "  {:<22} {}",
                "Active workout plans:",
                stats.active_workout_plans.to_string().cyan()
            );
            if !dashboard.recent_diet_plans.is_empty() {
                println!();
                println!("{}", "Recent diet plans".bold());
                for plan in &dashboard.recent_diet_plans {
                    println!(
                        "  {}  {:<30} {}",
                        plan.created_at.format("%Y-%m-%d").to_string().dimmed(),
                        plan.title,
                        plan_status(plan.is_active)
                    );
                }
            }
        }
        None => {
            let stats = home_stats(store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("  {:<12} {}", "Members:", stats.total_customers.to_string().cyan());
            println!("  {:<12} {}", "Trainers:", stats.total_trainers.to_string().cyan());
            println!("  {:<12} {}", "Diet plans:", stats.total_diet_plans.to_string().cyan());
        }
    }
    Ok(())
}

fn cmd_customers(
    store: &Store,
    session: &SessionManager<'_>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    if !session.is_trainer() {
        anyhow::bail!("only trainers can list customers");
    }
    let customers = store
        .users()
        .search_customers(search.as_deref().unwrap_or(""))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!("No customers found.");
        return Ok(());
    }
    for c in &customers {
        println!("  {:<20} {}  {}", c.username.cyan(), c.full_name(), c.email.dimmed());
    }
    Ok(())
}

fn cmd_customer_detail(session: &SessionManager<'_>, username: &str, json: bool) -> Result<()> {
    require_user(session)?;
    let detail = session.customer_detail(username)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let customer = &detail.customer;
    println!("{} {}", customer.full_name().bold(), format!("({})", customer.username).dimmed());
    println!("  {}  {}", "Email:".dimmed(), customer.email);
    match &detail.profile {
        Some(profile) => {
            if let Some(goal) = profile.goal {
                println!("  {}  {}", "Goal:".dimmed(), goal.label());
            }
            if !profile.diseases.is_empty() {
                println!("  {}  {}", "Medical:".dimmed(), profile.diseases);
            }
            print!("  ");
            print_bmi(profile.bmi(), profile.bmi_category());
        }
        None => println!("  {}", "No profile yet.".dimmed()),
    }
    println!();

    if detail.plans.is_empty() {
        println!("No plans yet.");
    } else {
        print_plans(&detail.plans);
    }

    if detail.recent_progress.is_empty() {
        println!("No progress recorded yet.");
    } else {
        println!("{}", "Recent progress".bold());
        for r in &detail.recent_progress {
            println!("  {}  {:>7}  {}", r.date.to_string().cyan(), format!("{:.1}", r.weight_kg), r.notes);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// plan authoring
// ---------------------------------------------------------------------------

/// Customer id for `username`, or the input itself so that validation
/// reports it against `customerId`.
fn resolve_customer(store: &Store, username: &str) -> Result<String> {
    Ok(store
        .users()
        .find_by_username(username)?
        .map(|u| u.id)
        .unwrap_or_else(|| username.to_string()))
}

fn cmd_plan(store: &Store, session: &SessionManager<'_>, action: PlanAction) -> Result<()> {
    match action {
        PlanAction::CreateDiet {
            customer,
            title,
            description,
            breakfast,
            lunch,
            dinner,
            snacks,
            water_intake,
            supplements,
            notes,
            calories,
            protein,
        } => {
            let customer_id = resolve_customer(store, &customer)?;
            let plan = session.create_diet_plan(
                &customer_id,
                DietPlanInput {
                    title,
                    description,
                    breakfast,
                    lunch,
                    dinner,
                    snacks,
                    water_intake,
                    supplements,
                    notes,
                    calories_target: calories,
                    protein_target: protein,
                    is_active: true,
                },
            )?;
            println!(
                "{} Diet plan '{}' created for {}.",
                "✓".green(),
                plan.title,
                customer.cyan()
            );
        }
        PlanAction::CreateWorkout {
            customer,
            title,
            description,
            days,
            weeks,
        } => {
            let week = week_from_days(days)?;
            let customer_id = resolve_customer(store, &customer)?;
            let plan = session.create_workout_plan(
                &customer_id,
                WorkoutPlanInput {
                    title,
                    description,
                    days: week,
                    duration_weeks: weeks,
                    is_active: true,
                },
            )?;
            println!(
                "{} Workout plan '{}' ({} weeks) created for {}.",
                "✓".green(),
                plan.title,
                plan.duration_weeks,
                customer.cyan()
            );
        }
        PlanAction::EditDiet {
            plan_id,
            title,
            description,
            breakfast,
            lunch,
            dinner,
            snacks,
            water_intake,
            supplements,
            notes,
            calories,
            protein,
            status,
        } => {
            let plan = store
                .plans()
                .find_diet_plan(&plan_id)?
                .with_context(|| format!("no diet plan with id {plan_id}"))?;
            let mut input = DietPlanInput::from(&plan);
            for (field, value) in [
                (&mut input.title, title),
                (&mut input.description, description),
                (&mut input.breakfast, breakfast),
                (&mut input.lunch, lunch),
                (&mut input.dinner, dinner),
                (&mut input.snacks, snacks),
                (&mut input.water_intake, water_intake),
                (&mut input.supplements, supplements),
                (&mut input.notes, notes),
            ] {
                if let Some(value) = value {
                    *field = value;
                }
            }
            input.calories_target = calories.or(input.calories_target);
            input.protein_target = protein.or(input.protein_target);
            status.apply(&mut input.is_active);

            let plan = session.update_diet_plan(&plan_id, input)?;
            println!(
                "{} Diet plan '{}' updated ({}).",
                "✓".green(),
                plan.title,
                plan_status(plan.is_active)
            );
        }
        PlanAction::EditWorkout {
            plan_id,
            title,
            description,
            days,
            weeks,
            status,
        } => {
            let plan = store
                .plans()
                .find_workout_plan(&plan_id)?
                .with_context(|| format!("no workout plan with id {plan_id}"))?;
            let mut input = WorkoutPlanInput::from(&plan);
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if !days.is_empty() {
                input.days = week_from_days(days)?;
            }
            input.duration_weeks = weeks.unwrap_or(input.duration_weeks);
            status.apply(&mut input.is_active);

            let plan = session.update_workout_plan(&plan_id, input)?;
            println!(
                "{} Workout plan '{}' updated ({}).",
                "✓".green(),
                plan.title,
                plan_status(plan.is_active)
            );
        }
    }
    Ok(())
}

/// Monday-first schedule from up to seven `--day` values; missing days are blank.
fn week_from_days(days: Vec<String>) -> Result<[String; 7]> {
    if days.len() > 7 {
        anyhow::bail!("at most 7 --day values (Monday to Sunday)");
    }
    let mut week: [String; 7] = Default::default();
    for (slot, routine) in week.iter_mut().zip(days) {
        *slot = routine;
    }
    Ok(week)
}
