use acsa::ai::{self, GeminiClient, TextGenerator};
use acsa::model::entity::{
    Competition, CompetitionCreate, Course, CourseCreate, Member, MemberCreateUpdate, Submission,
    UserProgress,
};
use acsa::model::{CrudRepository, DbConnection, ModelManager};
use acsa::web::{AuthenticatedUser, UserRole};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(about = "Operator CLI for the ACSA platform database", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage members
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage generated courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage competitions
    Competition {
        #[command(subcommand)]
        action: CompetitionCommands,
    },
}

/// Member management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        registration_number: String,
        #[arg(long, default_value = "member")]
        role: String,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// Generate a course through the AI service and persist it
    Generate {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "beginner")]
        level: String,
        #[arg(long, default_value = "4 weeks")]
        duration: String,
    },
}

/// Competition management
#[derive(Subcommand, Debug)]
pub enum CompetitionCommands {
    /// Generate the monthly competition, retiring the running ones
    Generate,
    /// Re-score every submission of a competition
    Recalculate {
        /// Competition title to recalculate
        #[arg(long)]
        title: String,
    },
}

#[tokio::main]
async fn main() -> acsa::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let db_con = DbConnection::connect(&std::env::var("DATABASE_URL").unwrap())?;
    let mm = ModelManager::new(db_con);
    let actor = AuthenticatedUser::admin();

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add {
                username,
                password,
                email,
                registration_number,
                role,
            } => {
                let member = Member::create(
                    &mm,
                    &actor,
                    MemberCreateUpdate {
                        username,
                        email,
                        password_hash: acsa::auth::hash_password(&password).unwrap(),
                        registration_number,
                        member_type: "student".to_string(),
                        phone_number: String::new(),
                        course: String::new(),
                        year_of_study: None,
                    },
                )
                .await?;

                if role == "admin" {
                    Member::set_role(&mm, &actor, member.id(), UserRole::Admin).await?;
                }
                println!("Member created: {:?}", member);
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Generate {
                topic,
                level,
                duration,
            } => {
                let Some(client) = GeminiClient::from_env() else {
                    eprintln!("Gemini API key not configured");
                    return Ok(());
                };
                let generator: &dyn TextGenerator = &client;

                let outline =
                    ai::generate_course_content(Some(generator), &topic, &level, &duration).await;
                let title = outline.title.clone();

                let create = CourseCreate::from_outline(&topic, &level, &duration, outline)
                    .expect("course outline serializes");
                let course = Course::create(&mm, &actor, create).await?;
                println!("Generated course {:?}: {}", course.id(), title);
            }
        },

        Commands::Competition { action } => match action {
            CompetitionCommands::Generate => {
                let Some(client) = GeminiClient::from_env() else {
                    eprintln!("Gemini API key not configured");
                    return Ok(());
                };

                match ai::generate_competition_problem(&client).await {
                    Ok(problem_statement) => {
                        Competition::deactivate_all(&mm, &actor).await?;

                        let now = Utc::now();
                        let competition = Competition::create(
                            &mm,
                            &actor,
                            CompetitionCreate {
                                title: format!("Actuarial Challenge {}", now.format("%B %Y")),
                                description:
                                    "Monthly actuarial competition testing your problem-solving skills"
                                        .to_string(),
                                problem_statement,
                                start_date: now,
                                end_date: now + Duration::days(30),
                            },
                        )
                        .await?;

                        println!("Created competition: {}", competition.title());
                    }
                    Err(e) => eprintln!("Error generating competition: {e}"),
                }
            }

            CompetitionCommands::Recalculate { title } => {
                let generator = GeminiClient::from_env();
                if generator.is_none() {
                    eprintln!("Gemini API key not configured, submissions get the default score");
                }
                let generator = generator
                    .as_ref()
                    .map(|client| client as &dyn TextGenerator);

                let competition = Competition::find_by_title(&mm, &actor, &title).await?;
                let Some(competition) = competition else {
                    eprintln!("No competition titled {title:?}");
                    return Ok(());
                };

                let submissions =
                    Submission::all_by_competition(&mm, &actor, competition.id()).await?;

                let mut updated = 0;
                for submission in submissions {
                    let new_score = ai::evaluate_submission(
                        generator,
                        competition.problem_statement(),
                        submission.solution(),
                    )
                    .await;

                    let old_score = submission.score().unwrap_or(0);
                    if new_score == old_score {
                        continue;
                    }

                    Submission::set_score(&mm, &actor, submission.id(), new_score).await?;
                    UserProgress::add_points(
                        &mm,
                        &actor,
                        submission.participant_id(),
                        new_score - old_score,
                    )
                    .await?;
                    updated += 1;
                }

                println!("Re-scored {updated} submissions for {}", competition.title());
            }
        },
    }

    Ok(())
}
