pub type Coordf32  = f32;
pub type Valuef32  = f32;
pub type Weightf32 = f32;

#[allow(non_camel_case_types)] pub type Index1_u  = usize;
#[allow(non_camel_case_types)] pub type Index2_u  = [usize; 2];
#[allow(non_camel_case_types)] pub type GridDim_u = [usize; 2];
