//! # afap-certificate
//!
//! The `CertificateRenderer` capability: turns the certificate data
//! contract into document bytes. Rendering is a pure function of the
//! snapshot, the public base URL, and the render timestamp, so a re-render
//! of an unchanged permit differs only in the regenerated timestamp and
//! verification code.

pub mod code;
pub mod pdf;
pub mod renderer;

pub use pdf::PdfCertificateRenderer;
pub use renderer::CertificateRenderer;
