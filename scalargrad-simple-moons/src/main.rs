use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};
use scalargrad::Value;

use crate::nn::{Mlp, Module};

mod nn;

/// Two interleaved half-moons with a little noise, labeled -1.0 / 1.0.
fn make_moons<R: Rng>(rng: &mut R, n: usize, noise: f64) -> Vec<([f64; 2], f64)> {
    let jitter = Uniform::new(-noise, noise);
    let half = n / 2;
    let mut points = Vec::with_capacity(2 * half);
    for i in 0..half {
        let t = std::f64::consts::PI * i as f64 / half as f64;
        points.push((
            [
                t.cos() + rng.sample(jitter),
                t.sin() + rng.sample(jitter),
            ],
            1.0,
        ));
        points.push((
            [
                1.0 - t.cos() + rng.sample(jitter),
                0.5 - t.sin() + rng.sample(jitter),
            ],
            -1.0,
        ));
    }
    points
}

fn main() {
    let mut rng = StdRng::seed_from_u64(1337);
    let data = make_moons(&mut rng, 100, 0.1);
    let model = Mlp::new(&mut rng, &[2, 16, 16, 1]);

    let steps = 100;
    for step in 0..steps {
        let mut hits = 0;
        let mut loss_sum = Value::from(0.0);
        for (point, label) in &data {
            let inputs = [Value::from(point[0]), Value::from(point[1])];
            let score = model.forward(&inputs).remove(0);
            if (score.data() > 0.0) == (*label > 0.0) {
                hits += 1;
            }
            // Max-margin hinge: relu(1 - y * score).
            let margin = (&score * -*label + 1.0).relu();
            loss_sum = loss_sum + margin;
        }
        let data_loss = loss_sum / data.len() as f64;
        let mut reg = Value::from(0.0);
        for p in model.parameters() {
            reg = reg + p.square();
        }
        let total = data_loss + reg * 1e-4;

        model.zero_grad();
        total.backward();
        let lr = 1.0 - 0.9 * step as f64 / steps as f64;
        for p in model.parameters() {
            p.grad_step(lr);
        }

        if step % 10 == 0 {
            println!(
                "[step {}] loss {:.4}\taccuracy {:.2}",
                step,
                total.data(),
                hits as f64 / data.len() as f64
            );
        }
    }
}
