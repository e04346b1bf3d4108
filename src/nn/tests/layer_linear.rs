use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::nn::layer::{Linear, TraitLayer};
use crate::nn::{GradTarget, Init, Mode, NnError};

fn normal_linear(in_features: usize, out_features: usize) -> Linear {
    let mut rng = StdRng::seed_from_u64(42);
    Linear::new(
        in_features,
        out_features,
        Init::Normal {
            mean: 0.0,
            std: 0.5,
        },
        &mut rng,
    )
    .unwrap()
}

#[test]
fn test_linear_creation() {
    let mut rng = StdRng::seed_from_u64(0);
    let linear = Linear::new(3, 4, Init::Zeros, &mut rng).unwrap();
    assert_eq!(linear.weights().dim(), (3, 4));
    assert_eq!(linear.bias().dim(), (1, 4));
    assert_eq!(linear.out_features(3), 4);
    assert_eq!(linear.describe(), "Linear(3 -> 4)");

    // 维度为0应该失败
    assert!(Linear::new(0, 4, Init::Zeros, &mut rng).is_err());
}

#[test]
fn test_linear_glorot_uniform_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let linear = Linear::new(100, 50, Init::GlorotUniform, &mut rng).unwrap();
    let limit = (6.0_f32 / 150.0).sqrt();
    assert!(linear.weights().iter().all(|w| w.abs() <= limit));
    // 偏置始终零初始化
    assert!(linear.bias().iter().all(|&b| b == 0.0));
}

#[test]
fn test_linear_forward() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut linear = normal_linear(3, 2);
    let x = array![[1.0, 2.0, 3.0], [-1.0, 0.5, 0.0]];

    let y = linear.forward(&x, Mode::Train, &mut rng).unwrap();
    let expected = x.dot(linear.weights()) + linear.bias();
    assert_eq!(y.dim(), (2, 2));
    for (a, b) in y.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
    }
}

#[test]
fn test_linear_forward_shape_mismatch() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut linear = normal_linear(3, 2);
    let x = Array2::<f32>::zeros((2, 5));

    let result = linear.forward(&x, Mode::Train, &mut rng);
    assert_eq!(
        result,
        Err(NnError::ShapeMismatch {
            expected: vec![2, 3],
            got: vec![2, 5],
            message: "Linear层的输入".to_string(),
        })
    );
}

#[test]
fn test_linear_backward_params() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut linear = normal_linear(3, 2);
    let x = array![[1.0, 2.0, 3.0], [-1.0, 0.5, 0.0]];
    let grad_output = array![[1.0, -1.0], [0.5, 2.0]];

    linear.forward(&x, Mode::Train, &mut rng).unwrap();
    let grad_input = linear.backward(&grad_output, GradTarget::Params).unwrap();

    let expected_input = grad_output.dot(&linear.weights().t());
    for (a, b) in grad_input.iter().zip(expected_input.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
    }

    let expected_w = x.t().dot(&grad_output);
    let slots = linear.params_and_grads();
    assert_eq!(slots.len(), 2);
    for (a, b) in slots[0].grad.iter().zip(expected_w.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
    }
    // 偏置梯度为 batch 维度上的求和
    assert_abs_diff_eq!(slots[1].grad[[0, 0]], 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(slots[1].grad[[0, 1]], 1.0, epsilon = 1e-6);
}

#[test]
fn test_linear_backward_input_only_keeps_param_grads() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut linear = normal_linear(3, 2);
    let x = array![[1.0, 2.0, 3.0]];
    let grad_output = array![[1.0, -1.0]];

    linear.forward(&x, Mode::Train, &mut rng).unwrap();
    let grad_input = linear.backward(&grad_output, GradTarget::InputOnly).unwrap();
    assert_eq!(grad_input.dim(), (1, 3));

    let slots = linear.params_and_grads();
    assert!(slots[0].grad.iter().all(|&g| g == 0.0));
    assert!(slots[1].grad.iter().all(|&g| g == 0.0));
}

#[test]
fn test_linear_backward_without_forward() {
    let mut linear = normal_linear(3, 2);
    let result = linear.backward(&array![[1.0, 1.0]], GradTarget::Params);
    assert!(matches!(result, Err(NnError::ComputationError(_))));
}
