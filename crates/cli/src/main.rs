use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{train_test_split, MovieCatalog, MovieId, RatingsCorpus, RawRating, UserId};
use factorization::{evaluate_ratings, recommend, Model, RegressionMetrics, Trainer, TrainerConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Movie rating prediction with latent-factor matrix factorization
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Predict movie ratings and recommend movies with matrix factorization", long_about = None)]
struct Cli {
    /// Directory holding the ratings train/test CSVs and the movie catalog CSV
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(flatten)]
    training: TrainingArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Trainer hyperparameters
#[derive(Args)]
struct TrainingArgs {
    /// Embedding dimensionality
    #[arg(long, default_value = "100")]
    rank: usize,

    /// Passes over the training ratings
    #[arg(long, default_value = "20")]
    iterations: usize,

    #[arg(long, default_value = "0.01")]
    learning_rate: f32,

    #[arg(long, default_value = "0.02")]
    regularization: f32,

    /// Seed for factor initialization and shuffling
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Disable the learned user/item biases
    #[arg(long)]
    no_biases: bool,
}

impl TrainingArgs {
    fn to_config(&self) -> TrainerConfig {
        TrainerConfig::default()
            .with_rank(self.rank)
            .with_iterations(self.iterations)
            .with_learning_rate(self.learning_rate)
            .with_regularization(self.regularization)
            .with_seed(self.seed)
            .with_biases(!self.no_biases)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Train, then report RMSE / MAE / MSE on the test ratings
    Evaluate {
        /// Ignore the test file and hold out this fraction of the training file instead
        #[arg(long)]
        split: Option<f32>,
    },

    /// Predict how a user would rate one movie
    Predict {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        movie_id: MovieId,
    },

    /// Get the top-N movie recommendations for a user
    Recommend {
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Train, evaluate, score one pair and print a top-N list in one go
    Demo {
        #[arg(long, default_value = "6")]
        user_id: UserId,

        /// Movie to score (10 is GoldenEye in the sample catalog)
        #[arg(long, default_value = "10")]
        movie_id: MovieId,

        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading ratings from {}...", cli.data_dir.display());
    let start = Instant::now();
    let corpus = RatingsCorpus::load_from_dir(&cli.data_dir)
        .context("Failed to load ratings corpus")?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let config = cli.training.to_config();

    match cli.command {
        Commands::Evaluate { split } => handle_evaluate(&corpus, config, split)?,
        Commands::Predict { user_id, movie_id } => {
            let model = train(&corpus.train, config)?;
            handle_predict(&model, &corpus.catalog, user_id, movie_id);
        }
        Commands::Recommend { user_id, limit } => {
            let model = train(&corpus.train, config)?;
            handle_recommend(&model, &corpus.catalog, user_id, limit);
        }
        Commands::Demo {
            user_id,
            movie_id,
            limit,
        } => {
            let test = held_out_ratings(&corpus)?;
            let model = train(&corpus.train, config)?;
            let metrics = evaluate_ratings(&model, test)
                .context("Failed to evaluate the model")?;
            print_metrics(&metrics);
            handle_predict(&model, &corpus.catalog, user_id, movie_id);
            handle_recommend(&model, &corpus.catalog, user_id, limit);
        }
    }

    Ok(())
}

fn train(ratings: &[RawRating], config: TrainerConfig) -> Result<Model> {
    println!("Training the model...");
    let start = Instant::now();
    let model = Trainer::new(config)
        .fit_ratings(ratings)
        .context("Failed to train the model")?;
    info!(
        users = model.num_users(),
        movies = model.num_items(),
        elapsed = ?start.elapsed(),
        "Model trained"
    );
    println!("{} Trained in {:?}", "✓".green(), start.elapsed());
    Ok(model)
}

/// Held-out ratings from the test file, or an error pointing at `--split`
fn held_out_ratings(corpus: &RatingsCorpus) -> Result<&[RawRating]> {
    corpus.test.as_deref().ok_or_else(|| {
        anyhow!(
            "No {} in the data directory; use `evaluate --split <fraction>` to hold out part of the training ratings",
            data_loader::corpus::TEST_FILE
        )
    })
}

/// Handle the 'evaluate' command
fn handle_evaluate(corpus: &RatingsCorpus, config: TrainerConfig, split: Option<f32>) -> Result<()> {
    let metrics = match split {
        Some(fraction) => {
            let (train_set, test_set) = train_test_split(&corpus.train, fraction, config.seed)
                .context("Failed to split the training ratings")?;
            let model = train(&train_set, config)?;
            println!("Evaluating the model on a {:.0}% hold-out...", fraction * 100.0);
            evaluate_ratings(&model, &test_set)
        }
        None => {
            let test = held_out_ratings(corpus)?;
            let model = train(&corpus.train, config)?;
            println!("Evaluating the model...");
            evaluate_ratings(&model, test)
        }
    }
    .context("Failed to evaluate the model")?;

    print_metrics(&metrics);
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(model: &Model, catalog: &MovieCatalog, user_id: UserId, movie_id: MovieId) {
    let title = catalog.title(movie_id).unwrap_or("unknown title");
    println!(
        "{}",
        format!("Score for user {} liking '{}':", user_id, title).bold().blue()
    );

    if let Err(e) = model.try_predict(user_id, movie_id) {
        println!("  {} {} (using the global mean)", "!".yellow(), e);
    }
    println!("  Score: {:.2}", model.predict(user_id, movie_id));
    println!();
}

/// Handle the 'recommend' command
fn handle_recommend(model: &Model, catalog: &MovieCatalog, user_id: UserId, limit: usize) {
    println!(
        "{}",
        format!("Top {} movies for user {}:", limit, user_id).bold().blue()
    );
    if !model.is_known_user(user_id) {
        println!(
            "  {} User {} has no ratings in training, every movie gets the same score",
            "!".yellow(),
            user_id
        );
    }

    for (rank, rec) in recommend(model, user_id, catalog, limit).iter().enumerate() {
        println!(
            "{}. Score: {:.2}\tMovie: {}",
            (rank + 1).to_string().green(),
            rec.score,
            rec.title
        );
    }
}

fn print_metrics(metrics: &RegressionMetrics) {
    println!("{}", "Evaluation metrics:".bold().blue());
    println!("  RMSE: {:.2}", metrics.rmse);
    println!("  MAE:  {:.2}", metrics.mae);
    println!("  MSE:  {:.2}", metrics.mse);
    println!("  ({} test ratings scored)", metrics.count);
    if metrics.dropped > 0 {
        println!(
            "  {} {} test ratings skipped: user or movie not in training",
            "!".yellow(),
            metrics.dropped
        );
    }
    println!();
}
