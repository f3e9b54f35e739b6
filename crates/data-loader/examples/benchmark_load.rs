use data_loader::RatingsCorpus;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading ratings corpus...\n");

    let start = Instant::now();
    let corpus = RatingsCorpus::load_from_dir(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (train, test, movies) = corpus.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Training ratings: {}", train);
    println!("Test ratings: {}", test);
    println!("Movies: {}", movies);
    println!("\nPerformance: {:.0} ratings/second",
             (train + test) as f64 / elapsed.as_secs_f64());
}
