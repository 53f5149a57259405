//! Facial-image dataset ingestion: path grammars for four public face
//! databases, decoding, two-level face/eye detection with overlays, and a
//! walker that runs every sample of a dataset through that pipeline.

pub mod shared {
    pub mod constants;
    pub mod raster;
    pub mod rect;
}

pub mod dataset {
    pub mod domain {
        pub mod cmu_grammar;
        pub mod dataset;
        pub mod feret_filter;
        pub mod feret_grammar;
        pub mod inria_grammar;
        pub mod ncku_grammar;
        pub mod path_grammar;
        pub mod sample_id;
    }
    pub mod infrastructure;
}

pub mod decoding {
    pub mod domain {
        pub mod annotation_record;
        pub mod decode_error;
        pub mod raster_decoder;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod detection_params;
        pub mod detection_result;
        pub mod region_detector;
    }
    pub mod infrastructure;
}

pub mod overlay {
    pub mod domain {
        pub mod marker_style;
        pub mod region_painter;
    }
    pub mod infrastructure;
    pub mod hierarchical_overlay_engine;
}

pub mod display {
    pub mod domain {
        pub mod raster_display;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod dataset_walker;
    pub mod walk_logger;
    pub mod walk_report;
}
