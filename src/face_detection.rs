use crate::config::DetectorConfig;
use crate::detection::{detections_from_mat, Detection};
use crate::utils::frame_size;
use crate::{Error, Result};
use clap::ValueEnum;
use log::{debug, info};
use opencv::core::{Mat, Ptr, Size};
use opencv::objdetect::FaceDetectorYN;
use opencv::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// DNN backend used to run the model.
///
/// Ids mirror `cv::dnn::Backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Backend {
    /// `OpenCV`'s own DNN implementation
    #[default]
    #[serde(rename = "opencv")]
    #[value(name = "opencv")]
    OpenCv,
    /// NVIDIA CUDA
    #[serde(rename = "cuda")]
    #[value(name = "cuda")]
    Cuda,
    /// VeriSilicon TIM-VX NPU runtime
    #[serde(rename = "timvx")]
    #[value(name = "timvx")]
    TimVx,
    /// Huawei CANN NPU runtime
    #[serde(rename = "cann")]
    #[value(name = "cann")]
    Cann,
}

impl Backend {
    /// Numeric backend id understood by `OpenCV`
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::OpenCv => 3,
            Self::Cuda => 5,
            Self::TimVx => 7,
            Self::Cann => 8,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenCv => "opencv",
            Self::Cuda => "cuda",
            Self::TimVx => "timvx",
            Self::Cann => "cann",
        };
        f.write_str(name)
    }
}

/// Device the backend executes on.
///
/// Ids mirror `cv::dnn::Target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Target {
    /// Plain CPU
    #[default]
    #[serde(rename = "cpu")]
    #[value(name = "cpu")]
    Cpu,
    /// `OpenCL` device
    #[serde(rename = "opencl")]
    #[value(name = "opencl")]
    OpenCl,
    /// CUDA device, fp32
    #[serde(rename = "cuda")]
    #[value(name = "cuda")]
    Cuda,
    /// CUDA device, fp16
    #[serde(rename = "cuda-fp16")]
    #[value(name = "cuda-fp16")]
    CudaFp16,
    /// Neural processing unit
    #[serde(rename = "npu")]
    #[value(name = "npu")]
    Npu,
}

impl Target {
    /// Numeric target id understood by `OpenCV`
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Cpu => 0,
            Self::OpenCl => 1,
            Self::Cuda => 6,
            Self::CudaFp16 => 7,
            Self::Npu => 9,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cpu => "cpu",
            Self::OpenCl => "opencl",
            Self::Cuda => "cuda",
            Self::CudaFp16 => "cuda-fp16",
            Self::Npu => "npu",
        };
        f.write_str(name)
    }
}

/// Anything that can turn a frame into face detections.
///
/// The capture loop only talks to this trait, so it can run against a fake
/// detector in tests.
pub trait FaceInference {
    /// Configure the frame size the next `infer` calls will receive
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying detector rejects the size
    fn set_input_size(&mut self, size: Size) -> Result<()>;

    /// Frame size currently configured
    fn input_size(&self) -> Size;

    /// Detect faces in a single decoded frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame does not match the configured input size
    /// or if inference fails
    fn infer(&mut self, image: &Mat) -> Result<Vec<Detection>>;
}

/// YuNet face detector backed by `cv::FaceDetectorYN`
pub struct FaceDetector {
    model: Ptr<FaceDetectorYN>,
    model_path: PathBuf,
    config: DetectorConfig,
    input_size: Size,
}

impl FaceDetector {
    /// Load the YuNet model and build the detector with a 0x0 input size.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the model file does not exist or its path is
    /// not valid UTF-8, and `OpenCV` if the detector cannot be constructed.
    pub fn new<P: AsRef<Path>>(model_path: P, config: &DetectorConfig) -> Result<Self> {
        let model_path = model_path.as_ref().to_path_buf();
        if !model_path.exists() {
            return Err(Error::ModelError(format!(
                "Face detector model not found: {}",
                model_path.display()
            )));
        }

        let input_size = Size::new(0, 0);
        let model = Self::build(&model_path, config, input_size)?;
        info!(
            "Loaded face detector from {} (backend={}, target={})",
            model_path.display(),
            config.backend,
            config.target
        );

        Ok(Self {
            model,
            model_path,
            config: config.clone(),
            input_size,
        })
    }

    fn build(model_path: &Path, config: &DetectorConfig, input_size: Size) -> Result<Ptr<FaceDetectorYN>> {
        let model = model_path.to_str().ok_or_else(|| {
            Error::ModelError(format!("Model path is not valid UTF-8: {}", model_path.display()))
        })?;

        let detector = FaceDetectorYN::create(
            model,
            "",
            input_size,
            config.score_threshold,
            config.nms_threshold,
            config.top_k,
            config.backend.id(),
            config.target.id(),
        )?;
        Ok(detector)
    }

    /// Detector name shown in logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        "YuNet"
    }

    /// Path the model was loaded from
    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Current detector parameters
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Switch backend and target.
    ///
    /// `FaceDetectorYN` cannot change its execution target in place, so the
    /// detector is rebuilt with the stored thresholds and the input size that
    /// was last set.
    ///
    /// # Errors
    ///
    /// Returns `OpenCV` if the rebuilt detector cannot be constructed; the
    /// previous detector is kept in that case.
    pub fn set_backend_and_target(&mut self, backend: Backend, target: Target) -> Result<()> {
        let mut config = self.config.clone();
        config.backend = backend;
        config.target = target;

        self.model = Self::build(&self.model_path, &config, self.input_size)?;
        self.config = config;
        info!(
            "Rebuilt {} detector (backend={}, target={}, input={}x{})",
            self.name(),
            backend,
            target,
            self.input_size.width,
            self.input_size.height
        );
        Ok(())
    }

    /// Update the minimum confidence for reported faces
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for thresholds outside `[0, 1]`
    pub fn set_score_threshold(&mut self, threshold: f32) -> Result<()> {
        check_unit_interval("Score threshold", threshold)?;
        self.model.set_score_threshold(threshold)?;
        self.config.score_threshold = threshold;
        Ok(())
    }

    /// Update the IoU threshold used for non-maximum suppression
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for thresholds outside `[0, 1]`
    pub fn set_nms_threshold(&mut self, threshold: f32) -> Result<()> {
        check_unit_interval("NMS threshold", threshold)?;
        self.model.set_nms_threshold(threshold)?;
        self.config.nms_threshold = threshold;
        Ok(())
    }

    /// Update how many candidates are kept before NMS
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `top_k` is not positive
    pub fn set_top_k(&mut self, top_k: i32) -> Result<()> {
        if top_k <= 0 {
            return Err(Error::InvalidInput(format!("Top-K must be positive, got {top_k}")));
        }
        self.model.set_top_k(top_k)?;
        self.config.top_k = top_k;
        Ok(())
    }
}

impl FaceInference for FaceDetector {
    fn set_input_size(&mut self, size: Size) -> Result<()> {
        self.model.set_input_size(size)?;
        self.input_size = size;
        debug!("Detector input size set to {}x{}", size.width, size.height);
        Ok(())
    }

    fn input_size(&self) -> Size {
        self.input_size
    }

    fn infer(&mut self, image: &Mat) -> Result<Vec<Detection>> {
        let actual = frame_size(image)?;
        if actual != self.input_size {
            return Err(Error::InputSizeMismatch {
                expected_width: self.input_size.width,
                expected_height: self.input_size.height,
                actual_width: actual.width,
                actual_height: actual.height,
            });
        }

        let mut faces = Mat::default();
        self.model.detect(image, &mut faces)?;
        detections_from_mat(&faces)
    }
}

fn check_unit_interval(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )))
    }
}
