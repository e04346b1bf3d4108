mod layer_linear;
