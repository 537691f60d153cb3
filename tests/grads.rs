use ndarray::{array, Array1, Array2};
use perceptron::layers::Dense;
use perceptron::nn::Parameters;
use perceptron::Network;

const REG: f64 = 0.01;

fn small() -> (Parameters, Array2<f64>, Vec<usize>) {
    // Every pre-activation sits at least 0.05 away from the ReLU kink.
    let params = Parameters {
        hidden: Dense {
            w: array![[0.5, -0.3, 0.8], [0.2, 0.7, -0.4]],
            b: array![0.1, -0.1, 0.05],
        },
        output: Dense {
            w: array![[0.6, -0.4], [-0.5, 0.9], [0.3, 0.2]],
            b: array![0.05, -0.05],
        },
    };
    let x = array![[1.0, 0.5], [-0.5, 1.0], [0.3, -0.8], [-1.0, -0.2]];

    (params, x, vec![0, 1, 0, 1])
}

fn loss_at(params: Parameters, x: &Array2<f64>, labels: &[usize]) -> f64 {
    Network::from_parameters(params)
        .unwrap()
        .evaluate(x.view(), labels, REG)
        .unwrap()
        .loss
}

fn assert_close(analytical: f64, numerical: f64, what: &str) {
    let scale = analytical.abs().max(numerical.abs()).max(1e-8);
    let rel_error = (analytical - numerical).abs() / scale;
    assert!(
        rel_error < 1e-4,
        "{what}: analytical {analytical:.8e} vs numerical {numerical:.8e} (rel {rel_error:.2e})"
    );
}

#[test]
fn finite_differences_match_backprop() {
    let (params, x, labels) = small();
    let epsilon = 1e-5;

    let grads = Network::from_parameters(params.clone())
        .unwrap()
        .gradients(x.view(), &labels, REG)
        .unwrap();

    for ((k, j), g) in grads.hidden.w.indexed_iter() {
        let mut plus = params.clone();
        let mut minus = params.clone();
        plus.hidden.w[[k, j]] += epsilon;
        minus.hidden.w[[k, j]] -= epsilon;

        let numerical = (loss_at(plus, &x, &labels) - loss_at(minus, &x, &labels)) / (2. * epsilon);
        assert_close(*g, numerical, &format!("W1[{k}][{j}]"));
    }

    for ((j, c), g) in grads.output.w.indexed_iter() {
        let mut plus = params.clone();
        let mut minus = params.clone();
        plus.output.w[[j, c]] += epsilon;
        minus.output.w[[j, c]] -= epsilon;

        let numerical = (loss_at(plus, &x, &labels) - loss_at(minus, &x, &labels)) / (2. * epsilon);
        assert_close(*g, numerical, &format!("W2[{j}][{c}]"));
    }

    for (j, g) in grads.hidden.b.indexed_iter() {
        let mut plus = params.clone();
        let mut minus = params.clone();
        plus.hidden.b[j] += epsilon;
        minus.hidden.b[j] -= epsilon;

        let numerical = (loss_at(plus, &x, &labels) - loss_at(minus, &x, &labels)) / (2. * epsilon);
        assert_close(*g, numerical, &format!("b1[{j}]"));
    }

    for (c, g) in grads.output.b.indexed_iter() {
        let mut plus = params.clone();
        let mut minus = params.clone();
        plus.output.b[c] += epsilon;
        minus.output.b[c] -= epsilon;

        let numerical = (loss_at(plus, &x, &labels) - loss_at(minus, &x, &labels)) / (2. * epsilon);
        assert_close(*g, numerical, &format!("b2[{c}]"));
    }
}

#[test]
fn train_step_applies_exactly_the_reported_gradients() {
    let (params, x, labels) = small();
    let mut nn = Network::from_parameters(params.clone()).unwrap();

    let grads = nn.gradients(x.view(), &labels, REG).unwrap();
    nn.train_step(x.view(), &labels, 0.5, REG).unwrap();

    let after = nn.parameters();
    assert_eq!(after.hidden.w, &params.hidden.w - &(&grads.hidden.w * 0.5));
    assert_eq!(after.hidden.b, &params.hidden.b - &(&grads.hidden.b * 0.5));
    assert_eq!(after.output.w, &params.output.w - &(&grads.output.w * 0.5));
    assert_eq!(after.output.b, &params.output.b - &(&grads.output.b * 0.5));
}

#[test]
fn saturated_outputs_leave_only_weight_decay() {
    let (mut params, x, _) = small();
    // Class 0 wins by so much that softmax returns exactly [1, 0].
    params.output.b = array![1000., 0.];
    let labels = vec![0; x.nrows()];

    let mut nn = Network::from_parameters(params.clone()).unwrap();
    let report = nn.evaluate(x.view(), &labels, REG).unwrap();
    let grads = nn.gradients(x.view(), &labels, REG).unwrap();

    let expected_loss = 0.5
        * REG
        * (params.hidden.w.mapv(|w| w * w).sum() + params.output.w.mapv(|w| w * w).sum());
    assert!((report.loss - expected_loss).abs() < 1e-15);
    assert_eq!(report.accuracy, 1.);

    assert_eq!(grads.hidden.w, params.hidden.w.mapv(|w| REG * w));
    assert_eq!(grads.output.w, params.output.w.mapv(|w| REG * w));
    assert_eq!(grads.hidden.b, Array1::<f64>::zeros(3));
    assert_eq!(grads.output.b, Array1::<f64>::zeros(2));
}

#[test]
fn dead_unit_passes_no_gradient() {
    let params = Parameters {
        hidden: Dense {
            // Unit 1 is negative on the positive quadrant, unit 2 is exactly zero everywhere.
            w: array![[0.4, -0.5, 0.], [0.3, -0.5, 0.]],
            b: array![0.1, 0., 0.],
        },
        output: Dense {
            w: array![[0.2, -0.1, 0.3], [0.7, -0.6, 0.5], [-0.4, 0.8, 0.1]],
            b: array![0., 0., 0.],
        },
    };
    let x = array![[0.5, 0.2], [0.1, 0.9], [1.0, 1.0], [0.3, 0.6]];
    let labels = [0, 1, 2, 1];

    let mut nn = Network::from_parameters(params.clone()).unwrap();
    let forward = nn.predict(x.view()).unwrap();
    assert!(forward.hidden.column(1).iter().all(|h| *h == 0.));
    assert!(forward.hidden.column(2).iter().all(|h| *h == 0.));

    let grads = nn.gradients(x.view(), &labels, REG).unwrap();

    for j in [1, 2] {
        let expected = params.hidden.w.column(j).mapv(|w| REG * w);
        assert_eq!(grads.hidden.w.column(j), expected);
        assert_eq!(grads.hidden.b[j], 0.);
        // Nothing flows into W2 from a silent unit either.
        assert_eq!(
            grads.output.w.row(j),
            params.output.w.row(j).mapv(|w| REG * w)
        );
    }

    assert!(grads
        .hidden
        .w
        .column(0)
        .iter()
        .zip(params.hidden.w.column(0).iter())
        .any(|(g, w)| *g != REG * w));
}
