use std::sync::Arc;

use clap::{Parser, Subcommand};
use coursewright::Config;
use coursewright::api::{CourseApi, HttpCourseApi};
use coursewright::draft::{
    CoursePatch, DraftError, EditCommand, LessonDraft, LessonKind, LessonPatch, ModuleDraft,
    ModulePatch, NodeId,
};
use coursewright::editor::EditorSession;
use coursewright::error::{AppResult, run_with_error_handler};
use coursewright::reorder::DragSession;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for editing course outlines over the instructor API", long_about = None)]
pub struct Cli {
    /// Slug of the course to edit
    #[arg(long)]
    pub slug: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the course outline
    Show,

    /// Edit the course fields
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage modules
    Module {
        #[command(subcommand)]
        action: ModuleCommands,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },
}

/// Course field management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Set {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        short_description: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        discount_price: Option<f64>,
    },
}

/// Module management
#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    Remove {
        #[arg(long)]
        id: Uuid,
    },
    /// Move the module at one position to another
    Move {
        #[arg(long)]
        from: usize,
        #[arg(long, allow_negative_numbers = true)]
        to: isize,
    },
    Set {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

/// Lesson management
#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        /// Module the lesson belongs to
        #[arg(long)]
        module: Uuid,
        #[arg(long)]
        title: String,
        /// video | text | quiz | assignment | live_session
        #[arg(long)]
        kind: Option<LessonKind>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        /// Duration in seconds
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        preview: Option<bool>,
    },
    Remove {
        #[arg(long)]
        module: Uuid,
        #[arg(long)]
        id: Uuid,
    },
    /// Move a lesson inside its module
    Move {
        #[arg(long)]
        module: Uuid,
        #[arg(long)]
        from: usize,
        #[arg(long, allow_negative_numbers = true)]
        to: isize,
    },
    Set {
        #[arg(long)]
        module: Uuid,
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        kind: Option<LessonKind>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        preview: Option<bool>,
    },
}

#[tokio::main]
async fn main() {
    run_with_error_handler(run).await;
}

async fn run() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    coursewright::setup_trace();
    let args = Cli::parse();

    let config = Config::get_or_init(cfg!(debug_assertions)).await;
    let api: Arc<dyn CourseApi> = Arc::new(HttpCourseApi::from_config(config));
    let mut session = EditorSession::open(api, &args.slug).await?;

    match args.command {
        Commands::Show => print_outline(&session),

        Commands::Course { action } => match action {
            CourseCommands::Set {
                title,
                short_description,
                description,
                price,
                discount_price,
            } => {
                session.apply(EditCommand::UpdateCourse {
                    patch: CoursePatch {
                        title,
                        short_description,
                        description,
                        price,
                        discount_price,
                    },
                })?;
                session.save().await?;
                println!("Course updated: {}", session.draft().fields().title());
            }
        },

        Commands::Module { action } => match action {
            ModuleCommands::Add { title, description } => {
                session.apply(EditCommand::AddModule)?;
                let module = last_module_id(&session);
                session.apply(EditCommand::UpdateModule {
                    module,
                    patch: ModulePatch {
                        title: Some(title),
                        description,
                    },
                })?;
                session.apply(EditCommand::SetModuleEditing {
                    module,
                    editing: false,
                })?;
                session.save().await?;
                println!(
                    "Module created: {}",
                    session.draft().module(module).expect("just added").title()
                );
            }

            ModuleCommands::Remove { id } => {
                session.apply(EditCommand::DeleteModule {
                    module: NodeId::Persisted(id),
                })?;
                session.save().await?;
                println!("Module removed: {id}");
            }

            ModuleCommands::Move { from, to } => {
                let order = module_order(&session);
                let mut drag = DragSession::grab(order.len(), from)?;
                drag.hover(to);
                match drag.release() {
                    Some(plan) => {
                        session.apply(EditCommand::ReorderModules {
                            order: plan.ordering(&order),
                        })?;
                        session.save().await?;
                        println!("Module moved: {} -> {}", plan.from(), plan.to());
                    }
                    None => println!("Module already in place."),
                }
            }

            ModuleCommands::Set {
                id,
                title,
                description,
            } => {
                let module = NodeId::Persisted(id);
                session.apply(EditCommand::UpdateModule {
                    module,
                    patch: ModulePatch { title, description },
                })?;
                session.save().await?;
                println!("Module updated: {id}");
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::Add {
                module,
                title,
                kind,
                description,
                content,
                video_url,
                duration,
                preview,
            } => {
                let module = NodeId::Persisted(module);
                session.apply(EditCommand::AddLesson { module })?;
                let lesson = last_lesson_id(&session, module)?;
                session.apply(EditCommand::UpdateLesson {
                    module,
                    lesson,
                    patch: LessonPatch {
                        title: Some(title),
                        description,
                        content,
                        kind,
                        video_url,
                        duration_secs: duration,
                        is_preview: preview,
                    },
                })?;
                session.apply(EditCommand::SetLessonEditing {
                    module,
                    lesson,
                    editing: false,
                })?;
                session.save().await?;
                println!("Lesson created in module {}", module);
            }

            LessonCommands::Remove { module, id } => {
                session.apply(EditCommand::DeleteLesson {
                    module: NodeId::Persisted(module),
                    lesson: NodeId::Persisted(id),
                })?;
                session.save().await?;
                println!("Lesson removed: {id}");
            }

            LessonCommands::Move { module, from, to } => {
                let module = NodeId::Persisted(module);
                let order = lesson_order(&session, module)?;
                let mut drag = DragSession::grab(order.len(), from)?;
                drag.hover(to);
                match drag.release() {
                    Some(plan) => {
                        session.apply(EditCommand::ReorderLessons {
                            module,
                            order: plan.ordering(&order),
                        })?;
                        session.save().await?;
                        println!("Lesson moved: {} -> {}", plan.from(), plan.to());
                    }
                    None => println!("Lesson already in place."),
                }
            }

            LessonCommands::Set {
                module,
                id,
                title,
                kind,
                description,
                content,
                video_url,
                duration,
                preview,
            } => {
                session.apply(EditCommand::UpdateLesson {
                    module: NodeId::Persisted(module),
                    lesson: NodeId::Persisted(id),
                    patch: LessonPatch {
                        title,
                        description,
                        content,
                        kind,
                        video_url,
                        duration_secs: duration,
                        is_preview: preview,
                    },
                })?;
                session.save().await?;
                println!("Lesson updated: {id}");
            }
        },
    }

    Ok(())
}

fn print_outline(session: &EditorSession) {
    let draft = session.draft();
    println!("{} (slug: {})", draft.fields().title(), session.slug());
    for (at, module) in draft.modules().iter().enumerate() {
        println!("{:>3}. {} [{}]", at, module.title(), module.id());
        for (at, lesson) in module.lessons().iter().enumerate() {
            println!(
                "     {:>3}. {} ({:?}, {}s{})",
                at,
                lesson.title(),
                lesson.kind(),
                lesson.duration_secs(),
                if lesson.is_preview() { ", preview" } else { "" },
            );
        }
    }
}

fn module_order(session: &EditorSession) -> Vec<NodeId> {
    session.draft().modules().iter().map(ModuleDraft::id).collect()
}

fn last_module_id(session: &EditorSession) -> NodeId {
    session
        .draft()
        .modules()
        .last()
        .expect("a module was just added")
        .id()
}

fn lesson_order(session: &EditorSession, module: NodeId) -> AppResult<Vec<NodeId>> {
    let found = session
        .draft()
        .module(module)
        .ok_or(DraftError::UnknownModule(module))?;
    Ok(found.lessons().iter().map(LessonDraft::id).collect())
}

fn last_lesson_id(session: &EditorSession, module: NodeId) -> AppResult<NodeId> {
    let found = session
        .draft()
        .module(module)
        .ok_or(DraftError::UnknownModule(module))?;
    Ok(found
        .lessons()
        .last()
        .expect("a lesson was just added")
        .id())
}
