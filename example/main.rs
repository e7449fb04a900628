use mnist_mlp::data::load_dataset;
use mnist_mlp::models::saved_model_count;
use mnist_mlp::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::Path;

const TRAIN_IMAGES: &str = "data/train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "data/train-labels-idx1-ubyte";
const TEST_IMAGES: &str = "data/t10k-images-idx3-ubyte";
const TEST_LABELS: &str = "data/t10k-labels-idx1-ubyte";
const SAVES_DIR: &str = "saves";

const LAYER_SIZES: [usize; 3] = [784, 128, 10];
const LEARNING_RATE: f64 = 0.01;
const CLASSES: usize = 10;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::from_entropy();
    let mut network = Network::new(&LAYER_SIZES, LEARNING_RATE, &mut rng)?;

    loop {
        println!();
        println!("1) Train one epoch");
        println!("2) Test accuracy");
        println!("3) Load model");
        println!("4) Exit");
        print!("> ");
        io::stdout().flush()?;

        let mut choice = String::new();
        if io::stdin().read_line(&mut choice)? == 0 {
            break;
        }
        match choice.trim() {
            "1" => {
                if let Err(err) = train_epoch(&mut network) {
                    eprintln!("Training failed: {}", err);
                }
            }
            "2" => match test_accuracy(&network) {
                Ok(accuracy) => println!("Accuracy: {:.2}%", accuracy),
                Err(err) => eprintln!("Testing failed: {}", err),
            },
            "3" => {
                print!("Model file under {}/: ", SAVES_DIR);
                io::stdout().flush()?;
                let mut name = String::new();
                io::stdin().read_line(&mut name)?;
                match Network::load(Path::new(SAVES_DIR).join(name.trim())) {
                    Ok(loaded) => {
                        println!("Loaded model with layers {:?}", loaded.layer_sizes());
                        network = loaded;
                    }
                    Err(err) => eprintln!("Load failed: {}", err),
                }
            }
            "4" => break,
            other => println!("Unknown option: {}", other),
        }
    }

    Ok(())
}

/// One full pass over the training set, then a numbered snapshot under
/// `saves/`.
fn train_epoch(network: &mut Network) -> Result<()> {
    let dataset = load_dataset(TRAIN_IMAGES, TRAIN_LABELS, 60_000)?;
    for (i, (image, label)) in dataset.iter().enumerate() {
        network.train(image, &one_hot(*label as usize, CLASSES))?;
        if (i + 1) % 10_000 == 0 {
            println!("{}/{} samples", i + 1, dataset.len());
        }
    }

    let epoch = saved_model_count(SAVES_DIR) + 1;
    let snapshot = Path::new(SAVES_DIR).join(format!("epoch_{}.json", epoch));
    network.save(&snapshot)?;
    println!("Snapshot written to {}", snapshot.display());
    Ok(())
}

fn test_accuracy(network: &Network) -> Result<f64> {
    let dataset = load_dataset(TEST_IMAGES, TEST_LABELS, 10_000)?;
    let mut correct = 0usize;
    for (image, label) in &dataset {
        let prediction = network.predict(image)?;
        if argmax(&prediction) == *label as usize {
            correct += 1;
        }
    }
    Ok(100.0 * correct as f64 / dataset.len() as f64)
}
